// Code generated by taskcluster-cli generate-apis; DO NOT EDIT.

#[allow(unused_imports)]
use taskcluster_cli_generator::definitions::{Entry, Service};

/// Manifest the tables below were generated from
pub const MANIFEST_URL: &str = "https://ref.example/manifest.json";

pub static SERVICES: &[(&str, Service)] = &[
    (
        "index",
        Service {
            title: "Task Index API Documentation",
            description: "",
            base_url: "https://index.example.com/v1",
            entries: &[
                Entry {
                    entry_type: "function",
                    method: "put",
                    route: "/task/<namespace>",
                    args: &["namespace"],
                    query: &[],
                    name: "insertTask",
                    stability: "stable",
                    input: Some("https://schemas.example.com/queue/v1/task.json"),
                    output: None,
                    title: "Insert Task into Index",
                    description: "",
                },
            ],
        },
    ),
    (
        "queue",
        Service {
            title: "Queue API Documentation",
            description: "The queue service is responsible for accepting tasks",
            base_url: "https://queue.example.com/v1",
            entries: &[
                Entry {
                    entry_type: "function",
                    method: "put",
                    route: "/task/<taskId>",
                    args: &["taskId"],
                    query: &[],
                    name: "createTask",
                    stability: "stable",
                    input: Some("https://schemas.example.com/queue/v1/task.json"),
                    output: Some("https://schemas.example.com/queue/v1/task-status.json"),
                    title: "Create New Task",
                    description: "Create a new task",
                },
                Entry {
                    entry_type: "function",
                    method: "get",
                    route: "/task/<taskId>/status",
                    args: &["taskId"],
                    query: &[],
                    name: "status",
                    stability: "stable",
                    input: None,
                    output: Some("https://schemas.example.com/queue/v1/task-status.json"),
                    title: "Get task status",
                    description: "",
                },
                Entry {
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
                    description: "Respond without doing anything",
                },
            ],
        },
    ),
];

pub static SCHEMAS: &[(&str, &str)] = &[
    (
        "https://schemas.example.com/queue/v1/task-status.json",
        "{\"type\": \"object\", \"title\": \"Task Status \\\"Structure\\\"\"}",
    ),
    (
        "https://schemas.example.com/queue/v1/task.json",
        "{\"$schema\": \"http://json-schema.org/draft-06/schema#\", \"type\": \"object\"}",
    ),
];
