use crate::error::{ProtocolError, StoreError};
use crate::store::TodoStore;
use serde_json::{Value, json};

/// The store operations the model may invoke, as a closed dispatch table.
///
/// The set of tools is fixed at build time, so the name→function mapping is
/// a tagged enum rather than a dynamic registry; the two-argument update
/// shape is a per-variant signature instead of a runtime arity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    GetAllTodos,
    CreateTodo { input: String },
    UpdateTodoById { id: String, input: String },
    DeleteTodoById { id: String },
    SearchTodos { input: String },
}

/// Tool names in the order they are reported to the model.
pub const TOOL_NAMES: [&str; 5] = [
    "createTodo",
    "deleteTodoById",
    "getAllTodos",
    "searchTodos",
    "updateTodoById",
];

impl ToolCall {
    /// Map an action's `function`/`id`/`input` fields onto a tool variant.
    ///
    /// Missing arguments are passed through as empty strings so the store's
    /// validation produces the error observation, mirroring how a missing
    /// field reaches the store in the reference protocol. `updateTodoById`
    /// takes two arguments when both are present; with `id` absent the
    /// single argument lands in the id slot and title validation rejects
    /// the call.
    pub fn parse(
        function: &str,
        id: Option<String>,
        input: Option<String>,
    ) -> Result<Self, ProtocolError> {
        match function {
            "getAllTodos" => Ok(Self::GetAllTodos),
            "createTodo" => Ok(Self::CreateTodo {
                input: input.unwrap_or_default(),
            }),
            "updateTodoById" => Ok(match (id, input) {
                (Some(id), Some(input)) => Self::UpdateTodoById { id, input },
                (_, input) => Self::UpdateTodoById {
                    id: input.unwrap_or_default(),
                    input: String::new(),
                },
            }),
            "deleteTodoById" => Ok(Self::DeleteTodoById {
                id: id.or(input).unwrap_or_default(),
            }),
            "searchTodos" => Ok(Self::SearchTodos {
                input: input.unwrap_or_default(),
            }),
            other => Err(ProtocolError::UnknownTool {
                name: other.to_string(),
                available: TOOL_NAMES.join(", "),
            }),
        }
    }

    /// Execute against the store and return the observation payload.
    ///
    /// Store failures never cross this boundary as errors: they come back
    /// as `{"error": …}` payloads for the model to read and self-correct.
    pub async fn invoke(self, store: &TodoStore) -> Value {
        match self {
            Self::GetAllTodos => match store.all().await {
                Ok(todos) => json!(todos),
                Err(err) => error_payload("retrieve todos", &err),
            },
            Self::CreateTodo { input } => match store.create(&input).await {
                Ok(id) => json!(id),
                Err(err) => error_payload("create todo", &err),
            },
            Self::UpdateTodoById { id, input } => match store.update(&id, &input).await {
                Ok(id) => json!(id),
                Err(err) => error_payload("update todo", &err),
            },
            Self::DeleteTodoById { id } => match store.delete(&id).await {
                Ok(id) => json!(id),
                Err(err) => error_payload("delete todo", &err),
            },
            Self::SearchTodos { input } => match store.search(&input).await {
                Ok(todos) => json!(todos),
                Err(err) => error_payload("search todos", &err),
            },
        }
    }
}

fn error_payload(operation: &str, err: &StoreError) -> Value {
    json!({ "error": format!("Failed to {operation}: {err}") })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> TodoStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        TodoStore::new(pool).await.unwrap()
    }

    #[test]
    fn parse_maps_every_tool_name() {
        assert_eq!(
            ToolCall::parse("getAllTodos", None, None).unwrap(),
            ToolCall::GetAllTodos
        );
        assert_eq!(
            ToolCall::parse("createTodo", None, Some("milk".into())).unwrap(),
            ToolCall::CreateTodo {
                input: "milk".into()
            }
        );
        assert_eq!(
            ToolCall::parse("searchTodos", None, Some("milk".into())).unwrap(),
            ToolCall::SearchTodos {
                input: "milk".into()
            }
        );
    }

    #[test]
    fn parse_unknown_function_lists_available_names() {
        let err = ToolCall::parse("dropAllTodos", None, None).unwrap_err();

        let ProtocolError::UnknownTool { name, available } = err else {
            panic!("expected unknown tool error");
        };
        assert_eq!(name, "dropAllTodos");
        for tool in TOOL_NAMES {
            assert!(available.contains(tool));
        }
    }

    #[test]
    fn parse_update_takes_two_arguments_when_both_present() {
        let call =
            ToolCall::parse("updateTodoById", Some("7".into()), Some("done".into())).unwrap();

        assert_eq!(
            call,
            ToolCall::UpdateTodoById {
                id: "7".into(),
                input: "done".into()
            }
        );
    }

    #[test]
    fn parse_update_without_id_degrades_to_single_argument() {
        let call = ToolCall::parse("updateTodoById", None, Some("7".into())).unwrap();

        assert_eq!(
            call,
            ToolCall::UpdateTodoById {
                id: "7".into(),
                input: String::new()
            }
        );
    }

    #[test]
    fn parse_delete_prefers_id_over_input() {
        let call =
            ToolCall::parse("deleteTodoById", Some("7".into()), Some("ignored".into())).unwrap();
        assert_eq!(call, ToolCall::DeleteTodoById { id: "7".into() });

        let fallback = ToolCall::parse("deleteTodoById", None, Some("9".into())).unwrap();
        assert_eq!(fallback, ToolCall::DeleteTodoById { id: "9".into() });
    }

    #[tokio::test]
    async fn invoke_create_returns_id_and_persists() {
        let store = store().await;

        let observation = ToolCall::CreateTodo {
            input: "buy milk".into(),
        }
        .invoke(&store)
        .await;

        let id = observation.as_str().expect("id observation").to_string();
        let todos = store.all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, id);
    }

    #[tokio::test]
    async fn invoke_get_all_returns_rows() {
        let store = store().await;
        store.create("one").await.unwrap();
        store.create("two").await.unwrap();

        let observation = ToolCall::GetAllTodos.invoke(&store).await;

        assert_eq!(observation.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invoke_with_blank_title_returns_error_payload() {
        let store = store().await;

        let observation = ToolCall::CreateTodo {
            input: String::new(),
        }
        .invoke(&store)
        .await;

        let message = observation["error"].as_str().unwrap();
        assert!(message.starts_with("Failed to create todo"));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invoke_delete_unknown_id_returns_error_payload() {
        let store = store().await;

        let observation = ToolCall::DeleteTodoById {
            id: "missing".into(),
        }
        .invoke(&store)
        .await;

        assert!(
            observation["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to delete todo")
        );
    }

    #[tokio::test]
    async fn invoke_search_returns_matches_only() {
        let store = store().await;
        store.create("buy milk").await.unwrap();
        store.create("walk the dog").await.unwrap();

        let observation = ToolCall::SearchTodos {
            input: "milk".into(),
        }
        .invoke(&store)
        .await;

        let hits = observation.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "buy milk");
    }
}
