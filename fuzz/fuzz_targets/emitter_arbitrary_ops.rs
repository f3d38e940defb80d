#![no_main]

use std::cell::RefCell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use lrukit::events::{EventEmitter, ListenerError, ListenerHandle};

const EVENTS: [&str; 3] = ["a", "b", "c"];

// Fuzz arbitrary on/once/off/emit sequences on EventEmitter
//
// A plain Vec model tracks registrations per event. Every emit must invoke
// exactly the model's listeners, in order, up to the first failing one, and
// one-shots past the failure must stay registered.
fuzz_target!(|data: &[u8]| {
    let fired = Rc::new(RefCell::new(Vec::new()));

    // Handles 0..6 succeed, 6 and 7 fail.
    let handles: Vec<ListenerHandle<()>> = (0..8usize)
        .map(|i| {
            let sink = Rc::clone(&fired);
            ListenerHandle::fallible(move |_: &()| {
                sink.borrow_mut().push(i);
                if i >= 6 {
                    Err(ListenerError::new(format!("listener {} failed", i)))
                } else {
                    Ok(())
                }
            })
        })
        .collect();

    let emitter = EventEmitter::new();
    let mut model: Vec<Vec<(usize, bool)>> = vec![Vec::new(); EVENTS.len()];

    for pair in data.chunks_exact(2) {
        let event_idx = usize::from(pair[0] >> 4) % EVENTS.len();
        let event = EVENTS[event_idx];
        let listener = usize::from(pair[1]) % handles.len();
        let registrations = &mut model[event_idx];

        match pair[0] % 4 {
            0 => {
                emitter.on(event, handles[listener].clone());
                registrations.push((listener, false));
            }
            1 => {
                emitter.once(event, handles[listener].clone());
                registrations.push((listener, true));
            }
            2 => {
                let pos = registrations.iter().position(|(l, _)| *l == listener);
                if let Some(pos) = pos {
                    registrations.remove(pos);
                }
                assert_eq!(emitter.off(event, &handles[listener]), pos.is_some());
            }
            _ => {
                fired.borrow_mut().clear();
                // Registrations up to and including the first failing one
                // run; only the one-shots among them are retired.
                let reached = registrations
                    .iter()
                    .position(|(l, _)| *l >= 6)
                    .map_or(registrations.len(), |pos| pos + 1);
                let fails = reached > 0 && registrations[reached - 1].0 >= 6;
                let expected: Vec<usize> =
                    registrations[..reached].iter().map(|(l, _)| *l).collect();
                let had_listeners = !registrations.is_empty();

                let mut idx = 0;
                registrations.retain(|(_, once)| {
                    let keep = idx >= reached || !once;
                    idx += 1;
                    keep
                });

                match emitter.emit(event, &()) {
                    Ok(result) => {
                        assert!(!fails);
                        assert_eq!(result, had_listeners);
                    }
                    Err(_) => assert!(fails),
                }
                assert_eq!(*fired.borrow(), expected);
            }
        }

        for (idx, name) in EVENTS.iter().enumerate() {
            assert_eq!(emitter.listener_count(name), model[idx].len());
        }
    }
});
