// Host-side tests for environment texture turnover.

#![allow(dead_code)]
mod generation {
    include!("../src/render/generation.rs");
}

use generation::Generational;
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for a texture set that counts how many are alive.
struct Tracked {
    id: u64,
    live: Rc<Cell<i32>>,
}

impl Tracked {
    fn new(id: u64, live: &Rc<Cell<i32>>) -> Self {
        live.set(live.get() + 1);
        Self {
            id,
            live: live.clone(),
        }
    }

    fn destroy(self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn regeneration_keeps_one_live_set() {
    let live = Rc::new(Cell::new(0));
    let mut env = Generational::new(Tracked::new(0, &live));
    assert_eq!(live.get(), 1);
    for i in 1..=50 {
        env.replace(Tracked::new(i, &live), Tracked::destroy);
        assert_eq!(live.get(), 1, "after regeneration {i}");
    }
    assert_eq!(env.current().id, 50);
    assert_eq!(env.generation(), 51);
}

#[test]
fn retired_set_is_the_previous_one() {
    let live = Rc::new(Cell::new(0));
    let mut env = Generational::new(Tracked::new(7, &live));
    let mut retired = None;
    env.replace(Tracked::new(8, &live), |old| {
        retired = Some(old.id);
        old.destroy();
    });
    assert_eq!(retired, Some(7));
    assert_eq!(env.current().id, 8);
}
