// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buttons in a frame.
//!
//! Lay out a row of push buttons and a toggle, then replay a scripted pointer session through
//! the router and print what each button saw.
//!
//! Run:
//! - `cargo run -p cellgrid_demos --example button_frame`
//! - `RUST_LOG=cellgrid_index=trace cargo run -p cellgrid_demos --example button_frame`

use std::rc::Rc;

use cellgrid_router::{EventClass, EventRouter};
use cellgrid_widgets::Button;
use kurbo::{Point, Size};

fn main() {
    cellgrid_demos::init_tracing();

    let mut router = EventRouter::with_cell_size(64.0).expect("valid cell size");

    let size = Size::new(80.0, 30.0);
    let buttons: Vec<(&str, Rc<Button>)> = vec![
        ("ok", Rc::new(Button::push(Point::new(10.0, 10.0), size).with_hover_face())),
        ("cancel", Rc::new(Button::push(Point::new(100.0, 10.0), size).with_hover_face())),
        ("mute", Rc::new(Button::toggle(Point::new(190.0, 10.0), size))),
    ];
    for (name, b) in &buttons {
        let id = router.register(b).expect("button box is valid");
        println!("registered {name} as {id}");
    }

    let script = [
        (EventClass::Motion, Point::new(20.0, 20.0)),
        (EventClass::Motion, Point::new(120.0, 20.0)),
        (EventClass::Press, Point::new(120.0, 20.0)),
        // Drag off the button and let go outside; cancel still sees the release.
        (EventClass::Drag, Point::new(150.0, 200.0)),
        (EventClass::Release, Point::new(150.0, 200.0)),
        (EventClass::Press, Point::new(200.0, 20.0)),
        (EventClass::Release, Point::new(200.0, 20.0)),
        (EventClass::Scroll, Point::new(30.0, 30.0)),
    ];

    for (class, pos) in script {
        let report = router.route(class, pos, &());
        println!(
            "{class:?} at ({}, {}): delivered {}, left {}",
            pos.x, pos.y, report.delivered, report.left
        );
        for (name, b) in &buttons {
            for event in b.take_events() {
                println!("  {name}: {event:?}");
            }
        }
    }

    // Move the toggle and show that the router follows it.
    let (_, mute) = &buttons[2];
    mute.set_origin(Point::new(10.0, 300.0));
    router.relocate(mute).expect("mute is registered");
    router.route(EventClass::Press, Point::new(20.0, 310.0), &());
    router.route(EventClass::Release, Point::new(20.0, 310.0), &());
    println!("mute after move: {:?}", mute.take_events());

    for (name, b) in &buttons {
        println!("{name}: face {:?}", b.face());
    }
}
