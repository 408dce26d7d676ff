#[cfg(test)]
pub mod test {
    use std::collections::{BTreeMap, HashMap};
    use std::rc::Rc;
    use std::time::Duration;

    use indexmap::IndexMap;
    use num_complex::Complex;

    use crate::{record, scalar_newtype};

    scalar_newtype! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct Hostname(pub String);
    }

    record! {
        /// Exercises every composite kind.
        #[derive(Debug, Default, PartialEq)]
        pub struct AppConfig {
            pub host: String,
            pub port: u16,
            pub debug: bool,
            pub db_host: String,
            pub read_timeout: Duration,
            pub ratio: f64,
            pub offset: i32,
            pub signal: Complex<f64>,
            pub edge: Hostname,
            pub database: Database,
            pub store: CacheSettings,
            pub replica: Option<Replica>,
            pub tags: HashMap<String, String>,
            pub limits: BTreeMap<String, u32>,
            pub extra: IndexMap<String, toml::Value>,
            pub ids: HashMap<u32, String>,
            pub items: Vec<String>,
            pub nodes: Vec<Replica>,
            pub replicas: Vec<Option<Replica>>,
            pub ports: Vec<Option<u16>>,
            pub shared: Rc<Replica>,
            api_token: String,
        }
    }

    impl AppConfig {
        pub fn api_token(&self) -> &str {
            &self.api_token
        }
    }

    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct Database {
            pub url: Option<String>,
            pub pool_size: usize,
        }
    }

    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct CacheSettings {
            pub ttl: Duration,
            pub capacity: u32,
        }
    }

    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct Replica {
            pub host: String,
            pub weight: u8,
        }
    }

    // -- Deep path: Root.outer.inner (optional).port --------------------------

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Root {
            pub outer: Outer,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Outer {
            pub inner: Option<Inner>,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Inner {
            pub port: u16,
        }
    }

    // -- Prefix shadowing: field `a_b` vs nested path `a.b` -------------------

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Shadow {
            pub a: Alpha,
            pub a_b: Beta,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Alpha {
            pub b: Beta,
            pub z: String,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Beta {
            pub x: String,
            pub y: String,
        }
    }

    // -- Same-length tie between two fields ----------------------------------

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Tie {
            pub host_name: String,
            pub hostname: String,
        }
    }

    // -- Type-name match on an earlier field vs name match on a later one ---

    record! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Preferred {
            pub primary: CacheSettings,
            pub cache_settings: String,
        }
    }

    #[test]
    fn records_describe_fields_in_declaration_order() {
        use crate::Record;

        let config = AppConfig::default();
        let names: Vec<&str> = config.fields().iter().map(|f| f.name).collect();
        assert_eq!(&names[..3], &["host", "port", "debug"]);
        assert_eq!(names.last(), Some(&"api_token"));
        assert_eq!(config.type_name(), "AppConfig");
    }

    #[test]
    fn field_defs_carry_type_names_and_kinds() {
        use crate::{Kind, Record};

        let config = AppConfig::default();
        let def = |name: &str| *config.fields().iter().find(|f| f.name == name).unwrap();
        assert_eq!(def("store").type_name, Some("CacheSettings"));
        assert_eq!(def("store").kind, Kind::Record);
        assert_eq!(def("replica").type_name, None);
        assert_eq!(def("replica").kind, Kind::Pointer);
        assert_eq!(def("edge").type_name, Some("Hostname"));
        assert_eq!(def("tags").kind, Kind::Map);
        assert_eq!(def("items").kind, Kind::Sequence);
    }
}
