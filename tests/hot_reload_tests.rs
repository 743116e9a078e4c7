use fluroute::hot_reload::watch_manifest;
use fluroute::manifest::load_manifest;
use fluroute::router::RouteMatchType;
use fluroute::{Router, RouterConfig, SharedRouter};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;
use common::{handlers, temp_files};

const MANIFEST_V1: &str = r#"
routes:
  - pattern: /foo
    handler: foo_one
"#;

const MANIFEST_V2: &str = r#"
routes:
  - pattern: /foo
    handler: foo_two
  - pattern: /bar/:id
    handler: bar
"#;

// Appended to MANIFEST_V1 so the file never passes through an empty state.
const BROKEN_ROUTE: &str = r#"  - pattern: /baz
    handler: not_registered
"#;

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..20 {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    done()
}

#[test]
fn test_watch_manifest_reload() {
    let file = temp_files::create_temp_yaml(MANIFEST_V1);
    let registry = handlers::registry(&["foo_one", "foo_two", "bar"]);
    let config = RouterConfig::default();
    let manifest = load_manifest(file.path()).unwrap();
    let router = Arc::new(SharedRouter::new(
        Router::from_manifest(&manifest, &registry, config).unwrap(),
    ));

    let reloads: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let reloads_clone = Arc::clone(&reloads);

    let watcher = watch_manifest(file.path(), registry, config, Arc::clone(&router), move |r| {
        reloads_clone.lock().unwrap().push(r.route_count());
    })
    .expect("watch_manifest");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(file.path(), MANIFEST_V2).unwrap();

    assert!(wait_until(|| reloads.lock().unwrap().contains(&2)));

    let foo = router.match_route(&(), "/foo");
    assert_eq!(foo.as_visual().unwrap().build(&()).as_deref(), Some("foo_two"));
    assert_eq!(
        router.match_route(&(), "/bar/9").match_type(),
        RouteMatchType::Visual
    );

    drop(watcher);
}

#[test]
fn test_rejected_manifest_keeps_previous_router() {
    let file = temp_files::create_temp_yaml(MANIFEST_V1);
    let registry = handlers::registry(&["foo_one"]);
    let config = RouterConfig::default();
    let manifest = load_manifest(file.path()).unwrap();
    let router = Arc::new(SharedRouter::new(
        Router::from_manifest(&manifest, &registry, config).unwrap(),
    ));

    let published_baz = Arc::new(Mutex::new(false));
    let published_clone = Arc::clone(&published_baz);
    let watcher = watch_manifest(file.path(), registry, config, Arc::clone(&router), move |r| {
        if r.resolve("/baz").is_some() {
            *published_clone.lock().unwrap() = true;
        }
    })
    .expect("watch_manifest");

    std::thread::sleep(Duration::from_millis(100));
    let mut handle = OpenOptions::new().append(true).open(file.path()).unwrap();
    handle.write_all(BROKEN_ROUTE.as_bytes()).unwrap();
    handle.flush().unwrap();
    drop(handle);
    std::thread::sleep(Duration::from_millis(500));

    assert!(!*published_baz.lock().unwrap());
    assert!(router.load().resolve("/baz").is_none());
    let foo = router.match_route(&(), "/foo");
    assert_eq!(foo.as_visual().unwrap().build(&()).as_deref(), Some("foo_one"));

    drop(watcher);
}

#[test]
fn test_truncated_manifest_keeps_previous_router() {
    let file = temp_files::create_temp_yaml(MANIFEST_V1);
    let registry = handlers::registry(&["foo_one"]);
    let config = RouterConfig::default();
    let manifest = load_manifest(file.path()).unwrap();
    let router = Arc::new(SharedRouter::new(
        Router::from_manifest(&manifest, &registry, config).unwrap(),
    ));
    let before = router.load();

    let reloads: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let reloads_clone = Arc::clone(&reloads);
    let watcher = watch_manifest(file.path(), registry, config, Arc::clone(&router), move |r| {
        reloads_clone.lock().unwrap().push(r.route_count());
    })
    .expect("watch_manifest");

    std::thread::sleep(Duration::from_millis(100));
    std::fs::write(file.path(), "").unwrap();
    std::thread::sleep(Duration::from_millis(500));

    assert!(reloads.lock().unwrap().is_empty());
    assert!(Arc::ptr_eq(&before, &router.load()));
    let foo = router.match_route(&(), "/foo");
    assert_eq!(foo.as_visual().unwrap().build(&()).as_deref(), Some("foo_one"));

    drop(watcher);
}
