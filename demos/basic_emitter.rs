use std::rc::Rc;

use lrukit::events::{EventEmitter, ListenerError, ListenerHandle};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter = Rc::new(EventEmitter::<String>::new());

    let greeter = emitter.on_fn("greet", |name| println!("hello, {}", name));
    emitter.once_fn("greet", |name| println!("first visitor: {}", name));

    let weak = Rc::downgrade(&emitter);
    emitter.on_fn("greet", move |name| {
        if name == "bob" {
            if let Some(emitter) = weak.upgrade() {
                let _ = emitter.emit("audit", &format!("saw {}", name));
            }
        }
    });
    emitter.on_fn("audit", |line| println!("audit: {}", line));

    emitter.on(
        "strict",
        ListenerHandle::fallible(|s: &String| {
            if s.is_empty() {
                Err(ListenerError::new("empty payload"))
            } else {
                Ok(())
            }
        }),
    );

    let _ = emitter.emit("greet", &"ada".to_string());
    let _ = emitter.emit("greet", &"bob".to_string());

    emitter.off("greet", &greeter);
    println!("greet listeners left: {}", emitter.listener_count("greet"));
    println!("had listeners: {:?}", emitter.emit("nobody", &String::new()));

    match emitter.emit("strict", &String::new()) {
        Ok(_) => println!("strict accepted"),
        Err(err) => println!("strict rejected: {}", err),
    }
}

// Expected output:
// hello, ada
// first visitor: ada
// hello, bob
// audit: saw bob
// greet listeners left: 1
// had listeners: Ok(false)
// strict rejected: listener failed: empty payload
