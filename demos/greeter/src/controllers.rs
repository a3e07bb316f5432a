//! The demo's controllers: a greeter for the command line and a small user
//! directory reachable over HTTP verbs.

use parking_lot::RwLock;
use serde::Serialize;
use switchyard::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// In-memory user directory shared with handlers through `State<UserStore>`.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn seeded() -> Self {
        let store = Self::default();
        store.create("ada");
        store.create("grace");
        store
    }

    pub fn list(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    pub fn create(&self, name: &str) -> User {
        let mut users = self.users.write();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: name.to_string(),
        };
        users.push(user.clone());
        user
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        users.len() != before
    }
}

// ============================================================================
// Greeter
// ============================================================================

/// `say --words Hi`
async fn say(ctx: Context) -> ActionResult<String> {
    Ok(ctx.require("words")?.to_string())
}

/// `say Hello`
async fn say_words(words: String) -> String {
    words
}

/// `greet Ada --greeting Howdy`
async fn greet(name: String, ctx: Context) -> String {
    format!("{}, {name}!", ctx.attr_or("greeting", "Hello"))
}

pub static GREETER: ControllerDescriptor = define_controller! {
    /// Echo and greeting commands.
    name: "greeter",
    actions: [
        action("say").cli().help("Print the --words attribute").handler(say),
        action("say").cli().params(["words"]).help("Print the words").handler(say_words),
        action("greet")
            .params(["name"])
            .help("Greet someone; --greeting overrides the salutation")
            .handler(greet),
    ],
};

// ============================================================================
// Users
// ============================================================================

async fn list_users(store: State<UserStore>) -> Json<Vec<User>> {
    Json(store.list())
}

async fn get_user(store: State<UserStore>, id: i64) -> ActionResult<Json<User>> {
    store
        .get(id)
        .map(Json)
        .ok_or_else(|| ActionError::msg(format!("no user with id {id}")))
}

async fn create_user(store: State<UserStore>, name: String) -> Json<User> {
    Json(store.create(&name))
}

async fn delete_user(store: State<UserStore>, id: i64) -> ActionResult<()> {
    if store.remove(id) {
        Ok(())
    } else {
        Err(ActionError::msg(format!("no user with id {id}")))
    }
}

pub static USERS: ControllerDescriptor = define_controller! {
    name: "users",
    actions: [
        action("users").get().help("List users").handler(list_users),
        action("users").get().params(["id"]).help("Fetch one user").handler(get_user),
        action("users").post().params(["name"]).help("Create a user").handler(create_user),
        action("users").delete().params(["id"]).help("Delete a user").handler(delete_user),
    ],
    metadata: {
        desc: "User directory",
    },
};

/// Every controller the demo can serve.
pub fn manifest() -> Manifest {
    Manifest::new().with(GREETER).with(USERS)
}

#[cfg(test)]
mod tests {
    use switchyard::core::FailureKind;

    use super::*;

    fn app() -> Application {
        let app = Application::builder()
            .config(SwitchyardConfig::default())
            .manifest(manifest())
            .state(UserStore::seeded())
            .build()
            .unwrap();
        app.start().unwrap();
        app
    }

    #[tokio::test]
    async fn say_overloads_follow_the_arguments() {
        let app = app();

        let result = app
            .dispatch(cli::request_from_args(["say", "Hello"]).unwrap())
            .await;
        assert_eq!(result.payload(), Some(&Payload::Text("Hello".into())));

        let result = app
            .dispatch(cli::request_from_args(["say", "--words", "Hi"]).unwrap())
            .await;
        assert_eq!(result.payload(), Some(&Payload::Text("Hi".into())));

        let result = app.dispatch(cli::request_from_args(["say"]).unwrap()).await;
        assert_eq!(result.failure_kind(), Some(FailureKind::MissingParameter));
    }

    #[tokio::test]
    async fn greet_reads_an_optional_attribute() {
        let app = app();
        let result = app
            .dispatch(cli::request_from_args(["greet", "Ada"]).unwrap())
            .await;
        assert_eq!(result.payload(), Some(&Payload::Text("Hello, Ada!".into())));

        let query = [("greeting", "Hi")];
        let response = http::handle(app.dispatcher(), "GET", "/greet/Bob", query).await;
        assert_eq!(response.body, b"Hi, Bob!");
    }

    #[tokio::test]
    async fn users_over_http() {
        let app = app();
        let none = Vec::<(&str, &str)>::new;

        let response = http::handle(app.dispatcher(), "GET", "/users/2", none()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"id":2,"name":"grace"}"#);

        let response = http::handle(app.dispatcher(), "POST", "/users/linus", none()).await;
        assert_eq!(response.body, br#"{"id":3,"name":"linus"}"#);

        let response = http::handle(app.dispatcher(), "DELETE", "/users/1", none()).await;
        assert_eq!(response.status, 204);

        let response = http::handle(app.dispatcher(), "GET", "/users/1", none()).await;
        assert_eq!(response.status, 500);

        let response = http::handle(app.dispatcher(), "GET", "/users/abc", none()).await;
        assert_eq!(response.status, 400);

        let response = http::handle(app.dispatcher(), "PUT", "/users", none()).await;
        assert_eq!(response.status, 405);
    }

    #[tokio::test]
    async fn users_are_not_reachable_from_the_command_line() {
        let app = app();
        let result = app
            .dispatch(cli::request_from_args(["users"]).unwrap())
            .await;
        assert_eq!(result.failure_kind(), Some(FailureKind::ModeRejected));
    }
}
