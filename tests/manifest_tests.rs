use fluroute::manifest::{load_manifest, ManifestFormat};
use fluroute::router::RouteMatchType;
use fluroute::{RouteError, Router, RouterConfig, TransitionType};
use std::time::Duration;

mod common;
use common::{handlers, temp_files};

const YAML: &str = r#"
not_found: missing
routes:
  - pattern: /
    handler: home
  - pattern: /user/:id
    handler: user
    transition: inFromRight
    transition_duration_ms: 120
"#;

const JSON: &str = r#"{
  "not_found": "missing",
  "routes": [
    { "pattern": "/", "handler": "home" },
    { "pattern": "/user/:id", "handler": "user", "transition": "inFromRight", "transition_duration_ms": 120 }
  ]
}"#;

const TOML: &str = r#"
not_found = "missing"

[[routes]]
pattern = "/"
handler = "home"

[[routes]]
pattern = "/user/:id"
handler = "user"
transition = "inFromRight"
transition_duration_ms = 120
"#;

#[test]
fn test_all_formats_load_the_same_manifest() {
    let yaml = temp_files::create_temp_yaml(YAML);
    let json = temp_files::create_temp_json(JSON);
    let toml = temp_files::create_temp_toml(TOML);

    let from_yaml = load_manifest(yaml.path()).unwrap();
    let from_json = load_manifest(json.path()).unwrap();
    let from_toml = load_manifest(toml.path()).unwrap();

    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml, from_toml);
    assert_eq!(from_yaml.routes.len(), 2);
    assert_eq!(from_yaml.not_found.as_deref(), Some("missing"));
}

#[test]
fn test_yml_extension_is_yaml() {
    let file = temp_files::create_temp_manifest(YAML, "yml");
    assert_eq!(ManifestFormat::from_path(file.path()), ManifestFormat::Yaml);
    assert!(load_manifest(file.path()).is_ok());
}

#[test]
fn test_router_built_from_file() {
    let file = temp_files::create_temp_yaml(YAML);
    let manifest = load_manifest(file.path()).unwrap();
    let registry = handlers::registry(&["home", "user", "missing"]);
    let router: Router<(), String> =
        Router::from_manifest(&manifest, &registry, RouterConfig::default()).unwrap();

    let result = router.match_route(&(), "/user/7?tab=posts");
    let visual = result.as_visual().unwrap();
    assert_eq!(visual.transition.kind, TransitionType::InFromRight);
    assert_eq!(visual.transition.duration, Duration::from_millis(120));
    assert_eq!(visual.build(&()).as_deref(), Some("user id=7 tab=posts"));

    let home = router.match_route(&(), "/");
    assert_eq!(home.as_visual().unwrap().transition.kind, TransitionType::Native);

    let fallback = router.match_route(&(), "/nowhere");
    assert_eq!(fallback.match_type(), RouteMatchType::Visual);
    assert!(fallback.as_visual().unwrap().is_not_found());
    assert_eq!(fallback.as_visual().unwrap().build(&()).as_deref(), Some("missing"));
}

#[test]
fn test_unknown_handler_names_the_route() {
    let file = temp_files::create_temp_yaml(YAML);
    let manifest = load_manifest(file.path()).unwrap();
    let registry = handlers::registry(&["home", "missing"]);

    let err = Router::from_manifest(&manifest, &registry, RouterConfig::default()).unwrap_err();
    assert_eq!(
        err,
        RouteError::UnknownHandler {
            handler: "user".to_string(),
            pattern: "/user/:id".to_string(),
        }
    );
}

#[test]
fn test_missing_file_error_names_the_path() {
    let err = load_manifest("/definitely/not/here/routes.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here/routes.yaml"));
}

#[test]
fn test_malformed_file_error_names_the_path() {
    let file = temp_files::create_temp_json("{ \"routes\": [ { \"pattern\": 3 ");
    let err = load_manifest(file.path()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to parse manifest"));
    assert!(message.contains(&file.path().display().to_string()));
}
