#![no_main]
use libfuzzer_sys::fuzz_target;

use loris_zone::constraint::raw;
use loris_zone::{ClockConstraint, Federation, Zone};

// Drive arbitrary in-contract operation sequences against a federation.
// The zone library must never panic on these, and reflexive inclusion and
// self-union stability must hold at every step.
fuzz_target!(|data: &[u8]| {
    const DIM: usize = 4;
    let max = [0, 5, 5, 5];
    let mut fed = Federation::zero(DIM);
    fed.up();
    for op in data.chunks_exact(4).take(64) {
        match op[0] % 6 {
            0 => {
                let i = op[1] as usize % DIM;
                let j = op[2] as usize % DIM;
                if i != j {
                    let bound = (op[3] & 0x7f) as i32 - 64;
                    let strict = op[3] & 0x80 != 0;
                    let _ = fed.constrain(&ClockConstraint {
                        i,
                        j,
                        raw: raw(bound, strict),
                    });
                }
            }
            1 => fed.up(),
            2 => {
                let x = 1 + op[1] as usize % (DIM - 1);
                fed.assign(x, (op[2] % 8) as i32);
            }
            3 => fed.extrapolate_max_bounds(&max),
            4 => {
                let copy = fed.clone();
                fed.union(&copy);
            }
            5 => fed.reduce(),
            _ => unreachable!(),
        }
        assert!(fed.includes(&fed.clone()));
    }
    let names: Vec<String> = (0..DIM).map(|i| format!("c{i}")).collect();
    let _ = fed.formula(&names);
});
