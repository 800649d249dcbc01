//! Integration tests for identifier resolution
//!
//! Covers factory, alias and bare type bindings, recursive constructor
//! injection and the existence check.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;

use kiln_core::container::{
    Arguments, Binding, Constructible, Constructor, Container, Parameter,
};
use kiln_core::errors::ContainerError;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Default)]
struct MailSender {
    sent: Vec<String>,
}

impl MailSender {
    fn send(&mut self, username: &str) {
        self.sent.push(username.to_string());
    }
}

impl Constructible for MailSender {
    const TYPE_NAME: &'static str = "MailSender";

    fn construct(_args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(MailSender::default())
    }
}

#[derive(Debug)]
struct Mail {
    sender: MailSender,
}

impl Constructible for Mail {
    const TYPE_NAME: &'static str = "Mail";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("mail_sender", "MailSender")]))
    }

    fn construct(args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Mail { sender: args.next()? })
    }
}

#[derive(Debug)]
struct User {
    mail: Mail,
}

impl User {
    fn send_mail(&mut self, username: &str) {
        self.mail.sender.send(username);
    }
}

impl Constructible for User {
    const TYPE_NAME: &'static str = "User";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("mail", "Mail")]))
    }

    fn construct(args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(User { mail: args.next()? })
    }
}

/// Constructor with a defaulted parameter only
#[derive(Debug)]
struct Signature {
    text: String,
}

impl Constructible for Signature {
    const TYPE_NAME: &'static str = "Signature";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("text", "SignatureText").with_default()]))
    }

    fn construct(args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Signature {
            text: args.next_or_default()?,
        })
    }
}

fn container() -> Container {
    init_tracing();
    let container = Container::new();
    container
        .register::<MailSender>()
        .register::<Mail>()
        .register::<User>()
        .register::<Signature>();
    container
}

#[test]
fn test_unregistered_identifiers_are_not_found() {
    let container = container();

    for id in ["Unknown", "", "Not A Type", "App\\Missing"] {
        let err = container.get(id).unwrap_err();
        assert!(err.is_not_found(), "{id:?} should not be found");
        assert!(!container.has(id));
    }
}

#[test]
fn test_factory_is_invoked_on_every_get() {
    let container = container();
    let counter = Arc::new(AtomicUsize::new(0));
    let calls = counter.clone();
    container.set_factory("ticket", move || calls.fetch_add(1, Ordering::SeqCst) + 1);

    let first = container.get_as::<usize>("ticket").unwrap();
    let second = container.get_as::<usize>("ticket").unwrap();
    let third = container.get_as::<usize>("ticket").unwrap();

    assert_eq!((first, second, third), (1, 2, 3));
}

#[test]
fn test_alias_constructs_target_type() {
    let container = container();
    container.set("Notifier", "Mail");

    let mail = container.get("Notifier").unwrap();
    assert!(mail.downcast_ref::<Mail>().is_some());
    assert!(container.has("Notifier"));
}

#[test]
fn test_alias_to_unknown_type_is_not_found() {
    let container = container();
    container.set_alias("Notifier", "PigeonPost");

    let err = container.get("Notifier").unwrap_err();
    assert!(err.is_not_found());
    assert!(!container.has("Notifier"));
}

#[test]
fn test_latest_binding_wins() {
    let container = container();
    container
        .set_instance("greeting", String::from("hello"))
        .set_instance("greeting", String::from("goodbye"));

    assert_eq!(container.get_as::<String>("greeting").unwrap(), "goodbye");

    container.set("greeting", "Mail");
    assert!(container.get_as::<Mail>("greeting").is_ok());
}

#[test]
fn test_default_constructible_types() {
    let container = container();

    let sender = container.get_as::<MailSender>("MailSender").unwrap();
    assert!(sender.sent.is_empty());

    // defaulted parameters are not injected when nothing is required
    let signature = container.get_as::<Signature>("Signature").unwrap();
    assert_eq!(signature.text, "");
}

#[test]
fn test_recursive_injection_builds_fresh_graph() {
    let container = container();

    let mut user = container.get_as::<User>("User").unwrap();
    user.send_mail("ada");
    assert_eq!(user.mail.sender.sent, vec!["ada"]);

    // nothing is cached between calls
    let other = container.get_as::<User>("User").unwrap();
    assert!(other.mail.sender.sent.is_empty());
}

#[test]
fn test_factory_bound_dependency_is_injected() {
    let container = container();
    container.set_factory("MailSender", || MailSender {
        sent: vec![String::from("preloaded")],
    });

    let user = container.get_as::<User>("User").unwrap();
    assert_eq!(user.mail.sender.sent, vec!["preloaded"]);
}

#[test]
fn test_missing_transitive_dependency_fails_whole_chain() {
    init_tracing();
    let container = Container::new();
    container.register::<User>().register::<Mail>();

    let err = container.get("User").unwrap_err();
    match err {
        ContainerError::NotFound { id, .. } => assert_eq!(id, "MailSender"),
        other => panic!("Expected NotFound, got {other:?}"),
    }

    // the existence check does not look at dependencies
    assert!(container.has("User"));
}

#[test]
fn test_abstract_binding_is_not_instantiable() {
    let container = container();
    container.register_abstract("Transport");
    container.set("Outbound", "Transport");

    assert!(!container.has("Transport"));
    assert!(!container.has("Outbound"));
    assert!(matches!(
        container.get("Outbound"),
        Err(ContainerError::NotInstantiable { .. })
    ));
}

#[test]
fn test_has_invokes_factory() {
    let container = container();
    let counter = Arc::new(AtomicUsize::new(0));
    let calls = counter.clone();
    container.set_factory("audit", move || {
        calls.fetch_add(1, Ordering::SeqCst);
    });

    assert!(container.has("audit"));
    assert!(container.has("audit"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_has_never_fails_on_failing_factory() {
    let container = container();
    container.set(
        "database",
        Binding::try_factory(|| -> Result<u8, ContainerError> {
            Err(ContainerError::factory("database", "connection refused"))
        }),
    );

    assert!(!container.has("database"));
    assert_eq!(container.get("database").unwrap_err().code(), "FACTORY_FAILED");
}

#[derive(Debug)]
struct Left;

impl Constructible for Left {
    const TYPE_NAME: &'static str = "Left";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("right", "Right")]))
    }

    fn construct(_args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Left)
    }
}

#[derive(Debug)]
struct Right;

impl Constructible for Right {
    const TYPE_NAME: &'static str = "Right";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("left", "LeftAlias")]))
    }

    fn construct(_args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Right)
    }
}

#[test]
fn test_cycle_through_alias_is_detected() {
    init_tracing();
    let container = Container::new();
    container.register::<Left>().register::<Right>();
    container.set_alias("LeftAlias", "Left");

    match container.get("Left") {
        Err(ContainerError::CircularDependency { path, cycle_service }) => {
            assert_eq!(path, "Left -> Right -> LeftAlias -> Right");
            assert_eq!(cycle_service, "Right");
        }
        other => panic!("Expected CircularDependency, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_factory_may_reenter_container() {
    let container = Arc::new(container());
    let inner = Arc::downgrade(&container);
    container.set_factory("mail_count", move || {
        inner
            .upgrade()
            .and_then(|c| c.get_as::<Mail>("Mail").ok())
            .map(|mail| mail.sender.sent.len())
    });

    assert_eq!(container.get_as::<Option<usize>>("mail_count").unwrap(), Some(0));
}

/// Needs an `Outbox`, which is bound to a factory resolving `Inbox` again
#[derive(Debug)]
struct Inbox;

impl Constructible for Inbox {
    const TYPE_NAME: &'static str = "Inbox";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("outbox", "Outbox")]))
    }

    fn construct(_args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Inbox)
    }
}

#[test]
fn test_cycle_through_factory_is_detected() {
    let container = Arc::new(container());
    container.register::<Inbox>();
    let inner = Arc::downgrade(&container);
    container.set(
        "Outbox",
        Binding::try_factory(move || {
            let container = inner
                .upgrade()
                .ok_or_else(|| ContainerError::factory("Outbox", "container dropped"))?;
            container.get("Inbox").map(|_| ())
        }),
    );

    match container.get("Inbox") {
        Err(ContainerError::CircularDependency { path, cycle_service }) => {
            assert_eq!(path, "Inbox -> Outbox -> Inbox");
            assert_eq!(cycle_service, "Inbox");
        }
        other => panic!("Expected CircularDependency, got {:?}", other.map(|_| ())),
    }

    // the failed chain leaves nothing in progress behind
    assert!(container.get_as::<User>("User").is_ok());
}

#[test]
fn test_concurrent_resolution_paths_are_independent() {
    let container = Arc::new(container());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                (0..50).all(|_| container.get_as::<User>("User").is_ok())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
