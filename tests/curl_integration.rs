//! Integration tests for curl generation
//!
//! These tests run complete requests through `Http2Curl` and compare the
//! rendered commands.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http2curl::curl::{Error, Http2Curl, MultipleCookiePolicy, Options, TargetPlatform};
use http2curl::http::{BodyPart, Content, Entity, Headers, HttpRequest, Method, OutboundRequest};
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn posix_short() -> Http2Curl {
    Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .use_short_form()
            .print_single_liner()
            .build()
            .unwrap(),
    )
}

fn windows_short() -> Http2Curl {
    Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Windows)
            .use_short_form()
            .build()
            .unwrap(),
    )
}

#[test]
fn test_get_request() {
    let request = HttpRequest::builder()
        .method(Method::Get)
        .uri("http://test.com:8080/items/query?x=y#z")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com:8080/items/query?x=y#z' --compressed -k -v"
    );
}

#[test]
fn test_get_request_https() {
    let request = HttpRequest::builder()
        .uri("https://test.com:8080/items/query?x=y#z")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'https://test.com:8080/items/query?x=y#z' --compressed -k -v"
    );
}

#[test]
fn test_get_request_has_single_positional_argument() {
    let request = HttpRequest::builder().uri("http://test.com/").build();
    let curl = posix_short().translate(&request).unwrap();

    assert!(curl.method().is_none());
    assert!(curl.data().is_empty());
    assert!(curl.data_binary().is_empty());

    let out = posix_short().generate_curl(&request).unwrap();
    assert!(!out.contains("--data"));
    assert!(!out.contains("-X"));
}

#[test]
fn test_basic_authentication() {
    let credentials = STANDARD.encode("xx:yy");
    let request = HttpRequest::builder()
        .uri("https://test.com:8080/items/query?x=y#z")
        .header("Authorization", format!("Basic {}", credentials))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'https://test.com:8080/items/query?x=y#z' -u 'xx:yy' --compressed -k -v"
    );
}

#[test]
fn test_basic_authentication_without_password() {
    let credentials = STANDARD.encode("xx:");
    let request = HttpRequest::builder()
        .uri("http://test.com:8080/items/query?x=y#z")
        .header("Authorization", format!("Basic {}", credentials))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com:8080/items/query?x=y#z' -u 'xx:' --compressed -k -v"
    );
}

#[test]
fn test_invalid_basic_authentication_is_kept_as_header() {
    let request = HttpRequest::builder()
        .uri("http://test.com:8080/items/query?x=y#z")
        .header("Authorization", "Basic xxx")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com:8080/items/query?x=y#z' -H 'Authorization: Basic xxx' --compressed -k -v"
    );
}

#[test]
fn test_form_urlencoded_post() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://google.pl/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Content-Length", "39")
        .body("param1=param1_value&param2=param2_value")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://google.pl/' -H 'Content-Type: application/x-www-form-urlencoded' \
         -d 'param1=param1_value&param2=param2_value' --compressed -k -v"
    );
}

#[test]
fn test_json_post_needs_no_method() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/items")
        .header("Content-Type", "application/json")
        .body("{\"name\":\"myname\"}")
        .build();

    let curl = posix_short().translate(&request).unwrap();
    assert!(curl.method().is_none());
    assert_eq!(curl.data(), ["{\"name\":\"myname\"}".to_string()]);
}

#[test]
fn test_put_with_body_states_method() {
    let request = HttpRequest::builder()
        .method(Method::Put)
        .uri("http://test.com/items/12345")
        .header("Content-Type", "application/json")
        .body("details={\"name\":\"myname\",\"age\":\"20\"}")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/items/12345' -X PUT -H 'Content-Type: application/json' \
         -d 'details={\"name\":\"myname\",\"age\":\"20\"}' --compressed -k -v"
    );
}

#[test]
fn test_json_with_charset_is_binary() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/items")
        .header("Content-Type", "application/json; charset=UTF-8")
        .body("{}")
        .build();

    let curl = posix_short().translate(&request).unwrap();
    assert!(curl.data().is_empty());
    assert_eq!(curl.data_binary(), ["{}".to_string()]);
}

#[test]
fn test_delete_and_head_state_method() {
    let delete = HttpRequest::builder()
        .method(Method::Delete)
        .uri("http://test.com/items/12345")
        .build();
    assert_eq!(
        posix_short().generate_curl(&delete).unwrap(),
        "curl 'http://test.com/items/12345' -X DELETE --compressed -k -v"
    );

    let head = HttpRequest::builder()
        .method(Method::Head)
        .uri("http://test.com/items/12345")
        .build();
    assert_eq!(
        posix_short().generate_curl(&head).unwrap(),
        "curl 'http://test.com/items/12345' -X HEAD --compressed -k -v"
    );
}

#[test]
fn test_single_cookie_header() {
    let request = HttpRequest::builder()
        .method(Method::Head)
        .uri("http://test.com/items/12345")
        .header("Cookie", "X=Y; A=B")
        .build();

    let out = posix_short().generate_curl(&request).unwrap();
    assert_eq!(
        out,
        "curl 'http://test.com/items/12345' -X HEAD -b 'X=Y; A=B' --compressed -k -v"
    );
    assert!(!out.contains("-H 'Cookie"));
}

#[test]
fn test_multiple_cookie_headers_are_kept_as_headers() {
    let request = HttpRequest::builder()
        .method(Method::Head)
        .uri("http://test.com/items/12345")
        .header("Cookie", "X=Y; A=B")
        .header("Cookie", "D=E")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/items/12345' -X HEAD -H 'Cookie: X=Y; A=B' -H 'Cookie: D=E' \
         --compressed -k -v"
    );
}

#[test]
fn test_multiple_cookie_headers_rejected_by_policy() {
    let http2curl = Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .multiple_cookie_policy(MultipleCookiePolicy::Reject)
            .build()
            .unwrap(),
    );
    let request = HttpRequest::builder()
        .uri("http://test.com/")
        .header("Cookie", "A=B")
        .header("Cookie", "C=D")
        .build();

    let err = http2curl.generate_curl(&request).unwrap_err();
    assert!(matches!(err, Error::MultipleCookieHeaders(2)));
}

#[test]
fn test_multiline_request() {
    let http2curl = Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .use_short_form()
            .print_multiliner()
            .build()
            .unwrap(),
    );
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://google.pl/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("param1=param1_value&param2=param2_value")
        .build();

    assert_eq!(
        http2curl.generate_curl(&request).unwrap(),
        "curl 'http://google.pl/' \\\n  -H 'Content-Type: application/x-www-form-urlencoded' \\\n  \
         -d 'param1=param1_value&param2=param2_value' \\\n  --compressed \\\n  -k \\\n  -v"
    );
}

#[test]
fn test_long_form() {
    let http2curl = Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .use_long_form()
            .print_single_liner()
            .build()
            .unwrap(),
    );
    let request = HttpRequest::builder()
        .uri("http://test.com:8080/items/query?x=y#z")
        .header("Host", "H")
        .build();

    assert_eq!(
        http2curl.generate_curl(&request).unwrap(),
        "curl 'http://test.com:8080/items/query?x=y#z' --header 'Host: H' \
         --compressed --insecure --verbose"
    );
}

#[test]
fn test_binary_body_escaping_per_platform() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/requestPath")
        .body("name=Administração")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/requestPath' --data-binary $'name=Administra\\xe7\\xe3o' \
         --compressed -k -v"
    );
    assert_eq!(
        windows_short().generate_curl(&request).unwrap(),
        "curl \"http://test.com/requestPath\" --data-binary \"name=Administração\" \
         --compressed -k -v"
    );
}

#[test]
fn test_invalid_utf8_body_keeps_bytes() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .header("Content-Type", "application/octet-stream")
        .body(vec![0x7f, 0x45, 0x4c, 0x46, 0x01, 0x00, 0xff])
        .build();

    let out = posix_short().generate_curl(&request).unwrap();
    assert!(out.contains("--data-binary $'\\x7fELF\\x01\\x00\\xff'"), "{}", out);
}

#[test]
fn test_multipart_file_part() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .header("Content-Type", "multipart/form-data; boundary=xyz")
        .header("Content-Length", "1234")
        .entity(Entity::Multipart(vec![BodyPart::file(
            "file",
            "README.md",
            "application/octet-stream",
        )]))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/upload' -F 'file=@README.md;type=application/octet-stream' \
         --compressed -k -v"
    );
}

#[test]
fn test_multipart_inline_parts_keep_order() {
    let request = HttpRequest::builder()
        .method(Method::Put)
        .uri("http://test.com/upload")
        .header("Content-Type", "multipart/form-data; boundary=xyz")
        .entity(Entity::Multipart(vec![
            BodyPart::form_field("message", "hello", "text/plain"),
            BodyPart::form_field("meta", "{\"a\":1}", "application/json"),
        ]))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/upload' -X PUT -F 'message=hello;type=text/plain' \
         -F 'meta={\"a\":1};type=application/json' --compressed -k -v"
    );
}

#[test]
fn test_multipart_part_read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"from disk").unwrap();

    let mut headers = Headers::new();
    headers.insert("Content-Disposition", "form-data; name=\"note\"");
    let part = BodyPart::new(headers, Content::File(file.path().to_path_buf()));

    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .entity(Entity::Multipart(vec![part]))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/upload' -F 'note=from disk' --compressed -k -v"
    );
}

#[test]
fn test_multipart_mixed_forces_content_type() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/batch")
        .header("Content-Type", "multipart/mixed; boundary=abc")
        .header("Accept", "*/*")
        .header("Content-Length", "99")
        .entity(Entity::Multipart(vec![BodyPart::form_field(
            "first",
            "one",
            "text/plain",
        )]))
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/batch' -H 'Accept: */*' -H 'Content-Type: multipart/mixed' \
         -F 'first=one;type=text/plain' --compressed -k -v"
    );
}

#[test]
fn test_unsupported_part_disposition_fails() {
    let mut headers = Headers::new();
    headers.insert("Content-Disposition", "attachment; filename=\"a.txt\"");
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .header("Content-Type", "multipart/form-data; boundary=xyz")
        .entity(Entity::Multipart(vec![BodyPart::new(headers, Content::from("x"))]))
        .build();

    let err = posix_short().generate_curl(&request).unwrap_err();
    assert!(matches!(err, Error::UnsupportedPart(_)));
}

#[test]
fn test_part_without_disposition_fails() {
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .entity(Entity::Multipart(vec![BodyPart::new(Headers::new(), Content::from("x"))]))
        .build();

    let err = posix_short().translate(&request).unwrap_err();
    assert!(matches!(err, Error::MissingContentDisposition));
}

#[test]
fn test_unreadable_body_fails() {
    let dir = tempfile::tempdir().unwrap();
    let request = HttpRequest::builder()
        .method(Method::Post)
        .uri("http://test.com/upload")
        .entity(Entity::Content(Content::File(dir.path().join("missing.bin"))))
        .build();

    let err = posix_short().generate_curl(&request).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_updater_redacts_headers() {
    let http2curl = Http2Curl::new(
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .use_short_form()
            .update_command(|curl| {
                curl.remove_header("Host").remove_header("User-Agent");
            })
            .build()
            .unwrap(),
    );
    let request = HttpRequest::builder()
        .uri("/items")
        .header("Host", "test.com")
        .header("User-Agent", "tests/1.0")
        .header("Accept", "*/*")
        .build();

    assert_eq!(
        http2curl.generate_curl(&request).unwrap(),
        "curl 'http://test.com/items' -H 'Accept: */*' --compressed -k -v"
    );
}

/// A request type from some other HTTP client, adapted at the boundary
struct ForeignRequest {
    method: String,
    path: String,
    headers: Headers,
}

impl OutboundRequest for ForeignRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn target(&self) -> &str {
        &self.path
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }
}

#[test]
fn test_custom_request_adapter() {
    let mut headers = Headers::new();
    headers.insert("Host", "api.test.com:443");
    let request = ForeignRequest {
        method: "PROPFIND".to_string(),
        path: "/dav//files".to_string(),
        headers,
    };

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'https://api.test.com:443/dav/files' -X PROPFIND -H 'Host: api.test.com:443' \
         --compressed -k -v"
    );
}

#[test]
fn test_adapter_method_cannot_break_out_of_command() {
    let mut headers = Headers::new();
    headers.insert("Host", "a.com");
    let request = ForeignRequest {
        method: "GET ; touch /tmp/owned #".to_string(),
        path: "/".to_string(),
        headers,
    };

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://a.com/' -X 'GET ; touch /tmp/owned #' -H 'Host: a.com' --compressed -k -v"
    );
    assert_eq!(
        windows_short().generate_curl(&request).unwrap(),
        "curl \"http://a.com/\" -X \"GET ; touch /tmp/owned #\" -H \"Host: a.com\" --compressed -k -v"
    );
}

#[test]
fn test_request_from_raw_header_lines() {
    let lines = [
        "Host: test.com:443",
        "Cookie: session=abc; theme=dark",
        "Accept:   application/json  ",
    ];
    let mut builder = HttpRequest::builder()
        .method("PATCH".parse::<Method>().unwrap())
        .uri("/items/7");
    for line in lines {
        builder = builder.header_line(line).unwrap();
    }
    let request = builder
        .header_line("Content-Type: application/json")
        .unwrap()
        .body("{\"done\":true}")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'https://test.com:443/items/7' -X PATCH -b 'session=abc; theme=dark' \
         -H 'Host: test.com:443' -H 'Accept: application/json' \
         -H 'Content-Type: application/json' -d '{\"done\":true}' --compressed -k -v"
    );
}

#[test]
fn test_url_globs_on_both_platforms() {
    let request = HttpRequest::builder()
        .uri("http://test.com/search?ids[]={1,2}")
        .build();

    assert_eq!(
        posix_short().generate_curl(&request).unwrap(),
        "curl 'http://test.com/search?ids\\[\\]=\\{1,2\\}' --compressed -k -v"
    );
    assert_eq!(
        windows_short().generate_curl(&request).unwrap(),
        "curl \"http://test.com/search?ids\\[\\]=\\{1,2\\}\" --compressed -k -v"
    );
}

#[test]
fn test_shared_generator_across_threads() {
    let http2curl = Arc::new(posix_short());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let http2curl = Arc::clone(&http2curl);
            thread::spawn(move || {
                let request = HttpRequest::builder()
                    .uri(format!("http://test.com/items/{}", i))
                    .build();
                http2curl.generate_curl(&request).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("curl 'http://test.com/items/{}' --compressed -k -v", i)
        );
    }
}
