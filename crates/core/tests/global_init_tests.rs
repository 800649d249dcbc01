//! The explicit initialization point of the global container.
//!
//! Kept in its own test binary: the global can only be installed once per
//! process.

use kiln_core::config::ContainerConfig;
use kiln_core::container::Container;
use kiln_core::errors::ContainerError;
use kiln_core::{dependency, dependency_as, dependency_exists, global};

#[test]
fn test_init_installs_container_once() {
    let config = ContainerConfig::new().with_alias("Clock", "SystemClock");
    let container = Container::with_config(config).unwrap();
    container.set_instance("app.name", String::from("kiln"));

    let installed = global::init(container).unwrap();
    assert!(std::ptr::eq(installed, global::instance()));

    assert_eq!(dependency_as::<String>("app.name").unwrap(), "kiln");
    assert!(dependency_exists("app.name"));
    assert!(global::instance().is_bound("Clock"));

    // alias target was never registered as a type
    assert!(dependency("Clock").unwrap_err().is_not_found());

    let second = global::init(Container::new());
    assert!(matches!(second, Err(ContainerError::AlreadyInitialized)));
    assert_eq!(dependency_as::<String>("app.name").unwrap(), "kiln");
}
