//! Full flow against the live server.
//!
//! # Design
//! Starts the server on a random port, then exercises every client operation
//! and the view over real HTTP using ureq. Validates that request building and
//! response parsing agree with the actual server.

use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient, TodoView, Transport,
    ViewState,
};

/// Blocking ureq transport.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the core client interprets them.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.agent;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Patch, _) => agent.patch(&req.path).send_empty(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn client_lifecycle() {
    let client = TodoClient::new(&spawn_server());
    let mut http = UreqTransport::new();

    // Step 1: list — should be empty.
    let todos = client
        .parse_list_todos(http.execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create.
    let input = CreateTodo {
        title: "Buy milk".to_string(),
    };
    let req = client.build_create_todo(&input).unwrap();
    let created = client.parse_create_todo(http.execute(req).unwrap()).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);

    // Step 3: blank title is rejected with the server's message.
    let blank = CreateTodo {
        title: "   ".to_string(),
    };
    let req = client.build_create_todo(&blank).unwrap();
    let err = client.parse_create_todo(http.execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Title is required"));

    // Step 4: toggle twice returns to the original flag.
    let req = client.build_toggle_todo(created.id);
    let toggled = client.parse_toggle_todo(http.execute(req).unwrap()).unwrap();
    assert!(toggled.completed);
    let req = client.build_toggle_todo(created.id);
    let toggled = client.parse_toggle_todo(http.execute(req).unwrap()).unwrap();
    assert_eq!(toggled, created);

    // Step 5: delete, then every id operation is NotFound.
    let req = client.build_delete_todo(created.id);
    client.parse_delete_todo(http.execute(req).unwrap()).unwrap();

    let req = client.build_toggle_todo(created.id);
    let err = client.parse_toggle_todo(http.execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let req = client.build_delete_todo(999);
    let err = client.parse_delete_todo(http.execute(req).unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "Todo not found");

    // Step 6: list — empty again.
    let todos = client
        .parse_list_todos(http.execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn view_against_live_server() {
    let client = TodoClient::new(&spawn_server());
    let mut view = TodoView::new(client, UreqTransport::new());

    assert_eq!(view.state(), ViewState::Loading);
    view.load().unwrap();
    assert_eq!(view.render(), "No todos yet");

    view.add("one").unwrap();
    view.add("two").unwrap();
    let third = view.add("three").unwrap();
    view.toggle(third.id).unwrap();

    let rendered = view.render();
    assert!(rendered.contains("2 items left"), "{rendered}");
    assert!(rendered.contains("1 completed"), "{rendered}");

    view.delete(third.id).unwrap();
    assert_eq!(view.todos().len(), 2);

    assert!(view.delete(third.id).is_err());
    assert!(view.render().starts_with("Error: "));
}

#[test]
fn view_reports_unreachable_server() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = TodoClient::new(&format!("http://{addr}"));
    let mut view = TodoView::new(client, UreqTransport::new());

    let err = view.load().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(view.is_error());
}

#[test]
fn mutation_on_fresh_view_reports_missing_id() {
    let client = TodoClient::new(&spawn_server());
    let mut view = TodoView::new(client, UreqTransport::new());

    let err = view.delete(999).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(view.is_error());
    assert_eq!(view.render(), "Error: Failed to delete todo: Todo not found");
}
