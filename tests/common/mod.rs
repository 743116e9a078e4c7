#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Creates a uniquely named manifest file that is removed when dropped
    pub fn create_temp_manifest(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("fluroute_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "json")
    }

    pub fn create_temp_toml(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "toml")
    }
}

pub mod handlers {
    use fluroute::{Handler, HandlerRegistry};

    /// Visual handler rendering `name` followed by `key=v1,v2` pairs
    pub fn page(name: &'static str) -> Handler<(), String> {
        Handler::route(move |_, params| {
            let mut out = name.to_string();
            for (k, v) in params.iter() {
                out.push_str(&format!(" {k}={}", v.join(",")));
            }
            Some(out)
        })
    }

    /// Registry with a `page` handler for each name
    pub fn registry(names: &[&'static str]) -> HandlerRegistry<(), String> {
        let mut registry = HandlerRegistry::new();
        for name in names {
            registry.register_handler(name, page(name));
        }
        registry
    }
}
