//! Static shapes the generated API tables compile against
//!
//! Generated files declare
//!
//! ```rust,ignore
//! pub static SERVICES: &[(&str, Service)] = &[ ... ];
//! pub static SCHEMAS: &[(&str, &str)] = &[ ... ];
//! ```
//!
//! with both tables sorted by key, so [`lookup`] can binary search them.

/// A service API definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub base_url: &'static str,
    pub entries: &'static [Entry],
}

/// A single API entry of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub entry_type: &'static str,
    pub method: &'static str,
    pub route: &'static str,
    pub args: &'static [&'static str],
    pub query: &'static [&'static str],
    pub name: &'static str,
    pub stability: &'static str,
    pub input: Option<&'static str>,
    pub output: Option<&'static str>,
    pub title: &'static str,
    pub description: &'static str,
}

impl Service {
    pub fn entry(&self, name: &str) -> Option<&'static Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Look up `key` in a generated table sorted by key
pub fn lookup<'t, T>(table: &'t [(&str, T)], key: &str) -> Option<&'t T> {
    table
        .binary_search_by(|(k, _)| Ord::cmp(*k, key))
        .ok()
        .map(|index| &table[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    static PING: Entry = Entry {
        entry_type: "function",
        method: "get",
        route: "/ping",
        args: &[],
        query: &[],
        name: "ping",
        stability: "stable",
        input: None,
        output: None,
        title: "Ping Server",
        description: "",
    };

    static TABLE: &[(&str, Service)] = &[
        (
            "auth",
            Service {
                title: "Auth",
                description: "",
                base_url: "https://auth.example.com/v1",
                entries: &[],
            },
        ),
        (
            "queue",
            Service {
                title: "Queue",
                description: "",
                base_url: "https://queue.example.com/v1",
                entries: std::slice::from_ref(&PING),
            },
        ),
    ];

    #[test]
    fn test_lookup_sorted_table() {
        assert_eq!(lookup(TABLE, "queue").unwrap().title, "Queue");
        assert!(lookup(TABLE, "hooks").is_none());
    }

    #[test]
    fn test_entry_by_name() {
        let queue = lookup(TABLE, "queue").unwrap();
        assert_eq!(queue.entry("ping").unwrap().route, "/ping");
        assert!(queue.entry("createTask").is_none());
    }
}
