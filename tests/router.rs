//! Integration tests for the router façade: per-method trees, the verb
//! shortcuts, redirect-target fixing, and the `Allow` list helper.

use http::Method;
use switchyard::{RouteError, Router};

#[test]
fn verb_shortcuts_register_under_their_method() {
    let mut router = Router::new();
    router.get("/res", "GET").unwrap();
    router.head("/res", "HEAD").unwrap();
    router.options("/res", "OPTIONS").unwrap();
    router.post("/res", "POST").unwrap();
    router.put("/res", "PUT").unwrap();
    router.patch("/res", "PATCH").unwrap();
    router.delete("/res", "DELETE").unwrap();

    for method in [
        Method::GET,
        Method::HEAD,
        Method::OPTIONS,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ] {
        let m = router.lookup(&method, "/res");
        assert_eq!(m.value, Some(&method.as_str()), "{method}");
    }
}

#[test]
fn handle_accepts_non_standard_methods() {
    let lock = Method::from_bytes(b"LOCK").unwrap();

    let mut router = Router::new();
    router.handle(lock.clone(), "/file/:name", ()).unwrap();

    let m = router.lookup(&lock, "/file/report.txt");
    assert!(m.value.is_some());
    assert_eq!(m.params.get("name"), Some("report.txt"));
    assert!(router.lookup(&Method::GET, "/file/report.txt").value.is_none());
}

#[test]
fn patterns_must_start_with_a_slash() {
    let mut router = Router::new();
    let err = router.get("noSlash", ()).unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }), "{err}");
}

#[test]
fn misses_with_a_trailing_slash_carry_a_hint() {
    let mut router = Router::new();
    router.get("/user/:name", ()).unwrap();

    let m = router.lookup(&Method::GET, "/user/gopher/");
    assert!(m.value.is_none());
    assert!(m.trailing_slash_hint);

    let m = router.lookup(&Method::GET, "/user/gopher");
    assert!(m.value.is_some());
    assert!(!m.trailing_slash_hint);
}

#[test]
fn catch_alls_capture_the_remainder_with_its_slash() {
    let mut router = Router::new();
    router.get("/files/*filepath", ()).unwrap();

    let m = router.lookup(&Method::GET, "/files/LICENSE");
    assert_eq!(m.params.get("filepath"), Some("/LICENSE"));

    // an empty remainder still binds, as "/"
    let m = router.lookup(&Method::GET, "/files/");
    assert!(m.value.is_some());
    assert_eq!(m.params.get("filepath"), Some("/"));
}

#[test]
fn fix_path_cleans_and_recovers_case() {
    let mut router = Router::new();
    router.get("/foo", ()).unwrap();
    router.get("/dir/", ()).unwrap();

    assert_eq!(
        router.fix_path(&Method::GET, "/FOO", true).as_deref(),
        Some("/foo")
    );
    assert_eq!(
        router.fix_path(&Method::GET, "/..//Foo", true).as_deref(),
        Some("/foo")
    );
    assert_eq!(
        router.fix_path(&Method::GET, "/foo/", true).as_deref(),
        Some("/foo")
    );
    assert_eq!(
        router.fix_path(&Method::GET, "/DIR", true).as_deref(),
        Some("/dir/")
    );

    // without the trailing-slash fix only the casing is corrected
    assert_eq!(
        router.fix_path(&Method::GET, "/FOO", false).as_deref(),
        Some("/foo")
    );
    assert_eq!(router.fix_path(&Method::GET, "/foo/", false), None);

    // unroutable paths and unknown methods stay unfixable
    assert_eq!(router.fix_path(&Method::GET, "/nope", true), None);
    assert_eq!(router.fix_path(&Method::POST, "/FOO", true), None);
}

#[test]
fn allowed_lists_the_other_matching_methods() {
    let mut router = Router::new();
    assert_eq!(router.allowed("/path", &Method::GET), "");
    assert_eq!(router.allowed("*", &Method::GET), "");

    router.post("/path", ()).unwrap();
    assert_eq!(router.allowed("/path", &Method::GET), "POST, OPTIONS");

    router.get("/path", ()).unwrap();
    router.get("/other", ()).unwrap();
    // the requested method itself is excluded
    assert_eq!(router.allowed("/path", &Method::GET), "POST, OPTIONS");
    assert_eq!(router.allowed("/path", &Method::DELETE), "GET, POST, OPTIONS");

    // a registered OPTIONS handler is not listed twice
    router.options("/path", ()).unwrap();
    assert_eq!(router.allowed("/path", &Method::DELETE), "GET, POST, OPTIONS");

    // "*" reports the server-wide method set
    assert_eq!(router.allowed("*", &Method::DELETE), "GET, POST, OPTIONS");

    assert_eq!(router.allowed("/nonexistent", &Method::GET), "");
}

#[test]
fn registration_errors_leave_the_router_usable() {
    let mut router = Router::new();
    router.get("/user/:name", 1).unwrap();

    let err = router.get("/user/new", 2).unwrap_err();
    assert!(matches!(err, RouteError::ConflictingRoute { .. }), "{err}");
    let err = router.get("/user/:name", 3).unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute { .. }), "{err}");

    let m = router.lookup(&Method::GET, "/user/gopher");
    assert_eq!(m.value, Some(&1));
}
