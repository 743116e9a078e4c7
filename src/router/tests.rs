use super::*;
use crate::error::RouteError;
use crate::handlers::Handler;
use crate::runtime_config::RouterConfig;
use crate::transition::{
    TransitionBuilder, TransitionConfig, TransitionProgress, TransitionType,
    DEFAULT_TRANSITION_DURATION,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type TestRouter = Router<(), String>;

fn page(name: &'static str) -> Handler<(), String> {
    Handler::route(move |_, params| {
        let mut out = name.to_string();
        for (k, v) in params.iter() {
            out.push_str(&format!(" {k}={}", v.join(",")));
        }
        Some(out)
    })
}

fn visual(m: RouteMatch<(), String>) -> VisualMatch<(), String> {
    match m {
        RouteMatch::Visual(v) => v,
        other => panic!("expected visual match, got {other:?}"),
    }
}

#[test]
fn test_visual_match_builds_handler_output() {
    let mut router = TestRouter::new();
    router
        .define("/user/:id", page("user"), TransitionConfig::new())
        .unwrap();

    let m = visual(router.match_route(&(), "/user/42?tab=profile"));
    assert_eq!(m.pattern.as_deref(), Some("/user/:id"));
    assert_eq!(m.parameters.get_all("id"), ["42"]);
    assert_eq!(m.parameters.get_all("tab"), ["profile"]);
    assert_eq!(m.build(&()), Some("user id=42 tab=profile".to_string()));
}

#[test]
fn test_function_handler_invoked_with_parameters() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut router = TestRouter::new();
    router
        .define(
            "/logout/:reason",
            Handler::function(move |_, params| {
                sink.lock()
                    .unwrap()
                    .push(params.get("reason").unwrap_or_default().to_string());
                None
            }),
            TransitionConfig::new(),
        )
        .unwrap();

    let result = router.match_route(&(), "/logout/expired");
    assert_eq!(result.match_type(), RouteMatchType::NonVisual);
    assert_eq!(result.pattern(), Some("/logout/:reason"));
    assert_eq!(*seen.lock().unwrap(), vec!["expired".to_string()]);
}

#[test]
fn test_resolve_does_not_invoke_function_handlers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut router = TestRouter::new();
    router
        .define(
            "/ping",
            Handler::function(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            }),
            TransitionConfig::new(),
        )
        .unwrap();

    let found = router.resolve("/ping").unwrap();
    assert_eq!(found.route.pattern, "/ping");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_match_without_not_found_handler() {
    let router = TestRouter::new();
    let result = router.match_route(&(), "/no/such/path");
    assert_eq!(result.match_type(), RouteMatchType::NoMatch);
    let message = result.error_message().unwrap();
    assert!(message.starts_with(NO_MATCH_MESSAGE));
    assert!(message.contains("/no/such/path"));
    assert!(result.parameters().is_none());
    assert!(!result.was_successful());
}

#[test]
fn test_not_found_handler_substituted_with_empty_parameters() {
    let mut router = TestRouter::new();
    router
        .define("/a", page("a"), TransitionConfig::new())
        .unwrap();
    router.set_not_found_handler(page("missing"));

    let m = visual(router.match_route(&(), "/b?x=1"));
    assert!(m.is_not_found());
    assert!(m.parameters.is_empty());
    assert_eq!(m.transition.kind, TransitionType::Native);
    assert_eq!(m.build(&()), Some("missing".to_string()));
}

#[test]
fn test_function_not_found_handler_is_non_visual() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut router = TestRouter::new();
    router.set_not_found_handler(Handler::function(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        None
    }));

    let result = router.match_route(&(), "/anything");
    assert_eq!(
        result,
        RouteMatch::NonVisual {
            pattern: None,
            parameters: Parameters::new(),
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_define_applies_default_duration() {
    let mut router: TestRouter = Router::with_config(RouterConfig {
        default_transition_duration: Duration::from_millis(400),
        ..RouterConfig::default()
    });
    router
        .define("/a", page("a"), TransitionConfig::new())
        .unwrap();
    router
        .define(
            "/b",
            page("b"),
            TransitionConfig::new().duration(Duration::from_millis(90)),
        )
        .unwrap();

    let a = router.resolve("/a").unwrap();
    assert_eq!(a.route.transition.duration, Some(Duration::from_millis(400)));
    let b = visual(router.match_route(&(), "/b"));
    assert_eq!(b.transition.duration, Duration::from_millis(90));
}

#[test]
fn test_custom_transition_requires_builder() {
    let mut router = TestRouter::new();
    let err = router
        .define(
            "/fancy",
            page("fancy"),
            TransitionConfig::new().kind(TransitionType::Custom),
        )
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::MissingTransitionBuilder {
            pattern: "/fancy".to_string()
        }
    );
    assert_eq!(router.route_count(), 0);
}

#[test]
fn test_custom_transition_builder_wraps_output() {
    let mut router = TestRouter::new();
    router
        .define(
            "/fancy",
            page("fancy"),
            TransitionConfig::new().custom(TransitionBuilder::new(|_, p, child| {
                format!("[{}] {child}", p.animation)
            })),
        )
        .unwrap();

    let m = visual(router.match_route(&(), "/fancy"));
    assert_eq!(m.transition.kind, TransitionType::Custom);
    let progress = TransitionProgress {
        animation: 1.0,
        secondary_animation: 0.0,
    };
    assert_eq!(
        m.build_with_transition(&(), &progress),
        Some("[1] fancy".to_string())
    );
}

#[test]
fn test_match_options_override_route_transition() {
    let mut router = TestRouter::new();
    router
        .define(
            "/sheet",
            page("sheet"),
            TransitionConfig::new().kind(TransitionType::FadeIn),
        )
        .unwrap();

    let options = MatchOptions {
        transition: TransitionConfig::new().kind(TransitionType::MaterialFullScreenDialog),
        maintain_state: false,
        settings: Some(RouteSettings::named("sheet-route")),
    };
    let m = visual(router.match_route_with(&(), "/sheet", &options));
    assert_eq!(m.transition.kind, TransitionType::MaterialFullScreenDialog);
    assert_eq!(m.transition.duration, DEFAULT_TRANSITION_DURATION);
    assert!(m.fullscreen_dialog());
    assert!(!m.maintain_state);
    assert_eq!(m.settings.name, "sheet-route");
}

#[test]
fn test_settings_default_to_requested_path() {
    let mut router = TestRouter::new();
    router
        .define("/user/:id", page("user"), TransitionConfig::new())
        .unwrap();
    let m = visual(router.match_route(&(), "/user/9?x=1"));
    assert_eq!(m.settings.name, "/user/9?x=1");
    assert!(m.maintain_state);
}

#[test]
fn test_none_transition_resolves_to_zero_duration() {
    let mut router = TestRouter::new();
    router
        .define(
            "/instant",
            page("instant"),
            TransitionConfig::new().kind(TransitionType::None),
        )
        .unwrap();
    let m = visual(router.match_route(&(), "/instant"));
    assert_eq!(m.transition.duration, Duration::ZERO);
}

#[test]
fn test_duplicate_default_route_keeps_router_unchanged() {
    let mut router = TestRouter::new();
    router
        .define_default(page("home"), TransitionConfig::new())
        .unwrap();
    let before = router.tree().to_string();

    let err = router
        .define_default(page("other"), TransitionConfig::new())
        .unwrap_err();

    assert_eq!(err, RouteError::DuplicateDefaultRoute);
    assert_eq!(router.tree().to_string(), before);
    assert_eq!(router.patterns(), ["/"]);
    let m = visual(router.match_route(&(), "/"));
    assert_eq!(m.build(&()), Some("home".to_string()));
}

#[test]
fn test_repeated_matches_are_equal() {
    let mut router = TestRouter::new();
    router
        .define("/a/:x", page("a"), TransitionConfig::new())
        .unwrap();
    router.set_not_found_handler(page("nf"));

    for path in ["/a/1?q=2", "/zzz", "/a/"] {
        let first = router.match_route(&(), path);
        let second = router.match_route(&(), path);
        assert_eq!(first, second, "path {path}");
    }
}

#[test]
fn test_cloned_router_is_independent() {
    let mut router = TestRouter::new();
    router
        .define("/a", page("a"), TransitionConfig::new())
        .unwrap();
    let snapshot = router.clone();
    router
        .define("/b", page("b"), TransitionConfig::new())
        .unwrap();

    assert_eq!(snapshot.route_count(), 1);
    assert_eq!(
        snapshot.match_route(&(), "/b").match_type(),
        RouteMatchType::NoMatch
    );
    assert_eq!(
        router.match_route(&(), "/b").match_type(),
        RouteMatchType::Visual
    );
}

#[test]
fn test_reject_policy_from_config() {
    let mut router: TestRouter = Router::with_config(RouterConfig {
        sibling_params: SiblingParamPolicy::Reject,
        ..RouterConfig::default()
    });
    router
        .define("/users/:id", page("by-id"), TransitionConfig::new())
        .unwrap();
    let err = router
        .define("/users/:name", page("by-name"), TransitionConfig::new())
        .unwrap_err();
    assert!(matches!(err, RouteError::ConflictingParameter { .. }));
    assert_eq!(router.patterns(), ["/users/:id"]);
}

#[test]
fn test_dump_tree_output() {
    let mut router = TestRouter::new();
    router
        .define_default(page("home"), TransitionConfig::new())
        .unwrap();
    router
        .define("/users/:id", page("user"), TransitionConfig::new())
        .unwrap();

    let mut out = Vec::new();
    router.dump_tree(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[routes] count=2 default_route=true\n/: total routes=1\nusers: total routes=0\n    :id: total routes=1\n"
    );
}
