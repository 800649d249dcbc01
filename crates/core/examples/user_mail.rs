//! Wires a `User` that depends on `Mail`, which depends on `MailSender`.
//!
//! Run with `RUST_LOG=debug` to see each resolution step.

use kiln_core::container::{Arguments, Constructible, Constructor, Container, Parameter};
use kiln_core::errors::ContainerError;
use kiln_core::global;

struct MailSender;

impl MailSender {
    fn send(&self, username: &str) {
        println!("Sending mail to {}", username);
    }
}

impl Constructible for MailSender {
    const TYPE_NAME: &'static str = "MailSender";

    fn construct(_args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(MailSender)
    }
}

struct Mail {
    mail_sender: MailSender,
}

impl Mail {
    fn send_mail(&self, username: &str) {
        self.mail_sender.send(username);
    }
}

impl Constructible for Mail {
    const TYPE_NAME: &'static str = "Mail";

    fn constructor() -> Option<Constructor> {
        Some(Constructor::new(vec![Parameter::typed("mail_sender", "MailSender")]))
    }

    fn construct(args: &mut Arguments) -> Result<Self, ContainerError> {
        Ok(Mail {
            mail_sender: args.next()?,
        })
    }
}

struct User {
    mail: Mail,
}

impl User {
    fn send_mail(&self, username: &str) {
        self.mail.send_mail(username);
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

fn main() -> Result<(), ContainerError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let container = Container::new();
    container
        .register::<MailSender>()
        .register::<Mail>()
        .register::<User>()
        .set_alias("Account", "User");
    global::init(container)?;

    let user = kiln_core::dependency_as::<User>("Account")?;
    user.send_mail("ada");

    println!("Notifier registered: {}", kiln_core::dependency_exists("Notifier"));
    Ok(())
}
