//! Chain of Responsibility: pass a request along linked handlers until one
//! of them deals with it.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Linking and default forwarding shared by every food handler.
pub trait Handler: Send + Sync {
    fn next(&self) -> Option<&dyn Handler>;

    /// Links `handler` after this one and returns it, so links can be chained:
    /// `monkey.set_next(squirrel).set_next(dog)`.
    fn set_next(&mut self, handler: Box<dyn Handler>) -> &mut dyn Handler;

    fn handle(&self, request: &str) -> Option<String> {
        self.next().and_then(|next| next.handle(request))
    }
}

macro_rules! food_handler {
    ($name:ident, $food:expr, $animal:expr) => {
        #[derive(Default)]
        pub struct $name {
            next: Option<Box<dyn Handler>>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl Handler for $name {
            fn next(&self) -> Option<&dyn Handler> {
                self.next.as_deref()
            }

            fn set_next(&mut self, handler: Box<dyn Handler>) -> &mut dyn Handler {
                &mut **self.next.insert(handler)
            }

            fn handle(&self, request: &str) -> Option<String> {
                if request == $food {
                    return Some(format!("{}: I'll eat the {}.", $animal, request));
                }
                self.next().and_then(|next| next.handle(request))
            }
        }
    };
}

food_handler!(MonkeyHandler, "Banana", "Monkey");
food_handler!(SquirrelHandler, "Nut", "Squirrel");
food_handler!(DogHandler, "MeatBall", "Dog");

/// The client only knows the first handler it was given.
pub fn client_code(handler: &dyn Handler, console: &dyn Console) {
    for food in ["Nut", "Banana", "Cup of coffee"] {
        console.write_line(&format!("Client: Who wants a {}?", food));
        match handler.handle(food) {
            Some(result) => console.write_line(&format!("  {}", result)),
            None => console.write_line(&format!("  {} was left untouched.", food)),
        }
    }
}

pub fn build_food_chain() -> MonkeyHandler {
    let mut monkey = MonkeyHandler::new();
    monkey
        .set_next(Box::new(SquirrelHandler::new()))
        .set_next(Box::new(DogHandler::new()));
    monkey
}

// Request validation

pub const DEFAULT_BLACKLIST: [&str; 1] = ["104.31.2.164"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBody {
    pub item: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub body: OrderBody,
    pub ip_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAuthenticated,
    PermissionDenied,
    ValidationFailed,
    BlacklistedIp,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Rejection::NotAuthenticated => "Denied access, user not authenticated",
            Rejection::PermissionDenied => "Denied access, permission failed",
            Rejection::ValidationFailed => "Validation failed",
            Rejection::BlacklistedIp => "Blacklisted IP Address",
        };
        f.write_str(message)
    }
}

impl std::error::Error for Rejection {}

/// A check that either rejects the request or hands it to the next check.
/// Reaching the end of the chain means the request is accepted.
pub trait RequestHandler: Send + Sync {
    fn check(&self, request: &Request) -> std::result::Result<(), Rejection>;
    fn next(&self) -> Option<&dyn RequestHandler>;
    fn set_next(&mut self, handler: Box<dyn RequestHandler>) -> &mut dyn RequestHandler;

    fn handle(&self, request: &Request) -> std::result::Result<(), Rejection> {
        self.check(request)?;
        match self.next() {
            Some(next) => next.handle(request),
            None => Ok(()),
        }
    }
}

macro_rules! request_handler_links {
    () => {
        fn next(&self) -> Option<&dyn RequestHandler> {
            self.next.as_deref()
        }

        fn set_next(&mut self, handler: Box<dyn RequestHandler>) -> &mut dyn RequestHandler {
            &mut **self.next.insert(handler)
        }
    };
}

#[derive(Default)]
pub struct AuthenticationHandler {
    next: Option<Box<dyn RequestHandler>>,
}

impl RequestHandler for AuthenticationHandler {
    fn check(&self, request: &Request) -> std::result::Result<(), Rejection> {
        if request.is_authenticated {
            Ok(())
        } else {
            Err(Rejection::NotAuthenticated)
        }
    }

    request_handler_links!();
}

#[derive(Default)]
pub struct AuthorizationHandler {
    next: Option<Box<dyn RequestHandler>>,
}

impl RequestHandler for AuthorizationHandler {
    fn check(&self, request: &Request) -> std::result::Result<(), Rejection> {
        if request.is_admin {
            Ok(())
        } else {
            Err(Rejection::PermissionDenied)
        }
    }

    request_handler_links!();
}

#[derive(Default)]
pub struct ValidationHandler {
    next: Option<Box<dyn RequestHandler>>,
}

impl RequestHandler for ValidationHandler {
    fn check(&self, request: &Request) -> std::result::Result<(), Rejection> {
        if request.body.item.is_empty() || request.body.price.is_empty() {
            return Err(Rejection::ValidationFailed);
        }
        Ok(())
    }

    request_handler_links!();
}

pub struct IpAddressHandler {
    blacklist: Vec<String>,
    next: Option<Box<dyn RequestHandler>>,
}

impl IpAddressHandler {
    pub fn new(blacklist: Vec<String>) -> Self {
        Self {
            blacklist,
            next: None,
        }
    }
}

impl Default for IpAddressHandler {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().map(|ip| ip.to_string()).collect())
    }
}

impl RequestHandler for IpAddressHandler {
    fn check(&self, request: &Request) -> std::result::Result<(), Rejection> {
        if self.blacklist.iter().any(|ip| *ip == request.ip_address) {
            return Err(Rejection::BlacklistedIp);
        }
        Ok(())
    }

    request_handler_links!();
}

/// Authentication > Authorization > Validation > IP blacklist.
pub fn build_request_chain(blacklist: Vec<String>) -> AuthenticationHandler {
    let mut authentication = AuthenticationHandler::default();
    authentication
        .set_next(Box::<AuthorizationHandler>::default())
        .set_next(Box::<ValidationHandler>::default())
        .set_next(Box::new(IpAddressHandler::new(blacklist)));
    authentication
}

pub fn request_client_code(
    handler: &dyn RequestHandler,
    request: &Request,
    console: &dyn Console,
) -> bool {
    match handler.handle(request) {
        Ok(()) => {
            console.write_line("Request valid, we can now process the order");
            true
        }
        Err(rejection) => {
            console.write_line(&rejection.to_string());
            false
        }
    }
}

pub struct ChainOfResponsibilityDemo {
    blacklist: Vec<String>,
}

impl ChainOfResponsibilityDemo {
    pub fn new(blacklist: Vec<String>) -> Self {
        Self { blacklist }
    }
}

impl Default for ChainOfResponsibilityDemo {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().map(|ip| ip.to_string()).collect())
    }
}

#[async_trait]
impl Demo for ChainOfResponsibilityDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "chain-of-responsibility",
            title: "Chain of Responsibility",
            category: PatternCategory::Behavioral,
            summary: "Passes requests along a chain of handlers until one handles it",
            complexity: 2,
            popularity: 1,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let console = console.as_ref();
        let monkey = build_food_chain();

        console.write_line("Chain: Monkey > Squirrel > Dog");
        console.blank_line();
        client_code(&monkey, console);
        console.blank_line();

        // Any handler can serve as an entry point, not just the first one.
        if let Some(squirrel) = monkey.next() {
            console.write_line("Subchain: Squirrel > Dog");
            console.blank_line();
            client_code(squirrel, console);
            console.blank_line();
        }

        let chain = build_request_chain(self.blacklist.clone());
        let body = OrderBody {
            item: "test".to_string(),
            price: "100".to_string(),
        };
        let admin_request = Request {
            is_authenticated: true,
            is_admin: true,
            body,
            ip_address: "107.77.194.36".to_string(),
        };
        let user_request = Request {
            is_admin: false,
            ..admin_request.clone()
        };

        request_client_code(&chain, &admin_request, console);
        request_client_code(&chain, &user_request, console);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    fn valid_request() -> Request {
        Request {
            is_authenticated: true,
            is_admin: true,
            body: OrderBody {
                item: "test".to_string(),
                price: "100".to_string(),
            },
            ip_address: "107.77.194.36".to_string(),
        }
    }

    #[test]
    fn test_full_chain_feeds_every_animal() {
        let chain = build_food_chain();
        assert_eq!(chain.handle("Banana").as_deref(), Some("Monkey: I'll eat the Banana."));
        assert_eq!(chain.handle("Nut").as_deref(), Some("Squirrel: I'll eat the Nut."));
        assert_eq!(chain.handle("MeatBall").as_deref(), Some("Dog: I'll eat the MeatBall."));
        assert_eq!(chain.handle("Cup of coffee"), None);
    }

    #[test]
    fn test_subchain_skips_monkey() {
        let chain = build_food_chain();
        let squirrel = chain.next().unwrap();
        assert_eq!(squirrel.handle("Banana"), None);
        assert!(squirrel.handle("Nut").is_some());
    }

    #[test]
    fn test_client_code_output() {
        let console = BufferConsole::new();
        client_code(&build_food_chain(), &console);
        assert_eq!(
            console.lines(),
            vec![
                "Client: Who wants a Nut?",
                "  Squirrel: I'll eat the Nut.",
                "Client: Who wants a Banana?",
                "  Monkey: I'll eat the Banana.",
                "Client: Who wants a Cup of coffee?",
                "  Cup of coffee was left untouched.",
            ]
        );
    }

    #[test]
    fn test_request_chain_accepts_valid_request() {
        let chain = build_request_chain(vec!["104.31.2.164".to_string()]);
        assert_eq!(chain.handle(&valid_request()), Ok(()));
    }

    #[test]
    fn test_request_chain_rejections() {
        let chain = build_request_chain(vec!["104.31.2.164".to_string()]);

        let anonymous = Request {
            is_authenticated: false,
            ..valid_request()
        };
        assert_eq!(chain.handle(&anonymous), Err(Rejection::NotAuthenticated));

        let user = Request {
            is_admin: false,
            ..valid_request()
        };
        assert_eq!(chain.handle(&user), Err(Rejection::PermissionDenied));

        let no_price = Request {
            body: OrderBody {
                item: "test".to_string(),
                price: String::new(),
            },
            ..valid_request()
        };
        assert_eq!(chain.handle(&no_price), Err(Rejection::ValidationFailed));

        let blacklisted = Request {
            ip_address: "104.31.2.164".to_string(),
            ..valid_request()
        };
        assert_eq!(chain.handle(&blacklisted), Err(Rejection::BlacklistedIp));
    }

    #[test]
    fn test_request_client_code_prints_rejection() {
        let console = BufferConsole::new();
        let chain = build_request_chain(Vec::new());
        let user = Request {
            is_admin: false,
            ..valid_request()
        };
        assert!(!request_client_code(&chain, &user, &console));
        assert_eq!(console.lines(), vec!["Denied access, permission failed"]);
    }
}
