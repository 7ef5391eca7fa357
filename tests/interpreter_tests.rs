// Integration tests for the interpreter engine

use fungeputer::interpreter::constants::{Cell, DEFAULT_STACK_LIMIT, GRID_HEIGHT, GRID_WIDTH};
use fungeputer::interpreter::engine::{Direction, Interpreter, Position, StepOutcome};
use fungeputer::interpreter::errors::RuntimeError;
use fungeputer::memory::grid::Grid;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn interpreter(source: &str) -> Interpreter {
    interpreter_with_limit(source, DEFAULT_STACK_LIMIT)
}

fn interpreter_with_limit(source: &str, limit: usize) -> Interpreter {
    let (grid, dropped) = Grid::from_text(source, GRID_WIDTH, GRID_HEIGHT);
    assert_eq!(dropped, 0);
    Interpreter::new(grid, limit, Box::new(StdRng::seed_from_u64(1)))
}

fn run_steps(interp: &mut Interpreter, n: usize) {
    for _ in 0..n {
        interp.step().expect("step failed");
    }
}

#[test]
fn test_push_digit_and_advance() {
    let mut interp = interpreter("1");
    let outcome = interp.step().unwrap();

    assert_eq!(outcome, StepOutcome::Continued);
    assert_eq!(interp.stack().values(), &[1]);
    assert_eq!(interp.position(), Position::new(1, 0));
}

#[test]
fn test_multiply_sequence() {
    let mut interp = interpreter("23*");

    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[2]);
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[2, 3]);
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[6]);
}

#[test]
fn test_duplicate_then_discard() {
    let mut interp = interpreter(":$");
    interp.stack_mut().push(5).unwrap();

    run_steps(&mut interp, 2);
    assert_eq!(interp.stack().values(), &[5]);
}

#[test]
fn test_duplicate_empty_pushes_zeros() {
    let mut interp = interpreter(":");
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[0, 0]);
}

#[test]
fn test_operand_order() {
    let cases: [(&str, Cell); 8] = [
        ("92-", 7),
        ("92/", 4),
        ("92%", 1),
        ("92`", 1),
        ("29`", 0),
        ("0!", 1),
        ("7!", 0),
        ("34+", 7),
    ];

    for (source, expected) in cases {
        let mut interp = interpreter(source);
        run_steps(&mut interp, source.len());
        assert_eq!(interp.stack().values(), &[expected], "program {}", source);
    }
}

#[test]
fn test_negative_division_truncates() {
    let mut interp = interpreter("05-2/");
    run_steps(&mut interp, 5);
    assert_eq!(interp.stack().values(), &[-2]);

    let mut interp = interpreter("05-2%");
    run_steps(&mut interp, 5);
    assert_eq!(interp.stack().values(), &[-1]);
}

#[test]
fn test_division_by_zero_is_recoverable() {
    let mut interp = interpreter("50/1");
    run_steps(&mut interp, 2);

    let err = interp.step().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::DivisionByZero {
            operation: '/',
            dividend: 5,
            ..
        }
    ));
    assert_eq!(err.position(), Position::new(2, 0));
    assert!(!interp.is_halted());
    assert!(interp.stack().is_empty());
    assert_eq!(interp.position(), Position::new(3, 0));

    // next step carries on normally
    assert_eq!(interp.step().unwrap(), StepOutcome::Continued);
    assert_eq!(interp.stack().values(), &[1]);
}

#[test]
fn test_modulo_by_zero() {
    let mut interp = interpreter("%");
    let err = interp.step().unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero { operation: '%', .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_halt_keeps_pointer() {
    let mut interp = interpreter("1@2");
    interp.step().unwrap();

    assert_eq!(interp.step().unwrap(), StepOutcome::Halted);
    assert!(interp.is_halted());
    assert_eq!(interp.position(), Position::new(1, 0));

    // no longer steppable
    assert_eq!(interp.step().unwrap(), StepOutcome::Halted);
    assert_eq!(interp.position(), Position::new(1, 0));
    assert_eq!(interp.stack().values(), &[1]);
}

#[test]
fn test_reset_makes_halted_engine_steppable() {
    let mut interp = interpreter("@");
    interp.step().unwrap();
    assert!(interp.is_halted());

    interp.reset();
    assert!(!interp.is_halted());
    assert_eq!(interp.position(), Position::new(0, 0));
    assert_eq!(interp.direction(), Direction::Right);
    assert_eq!(interp.steps(), 0);
}

#[test]
fn test_pointer_wraps_left_edge() {
    let mut interp = interpreter("<");
    interp.step().unwrap();
    assert_eq!(interp.direction(), Direction::Left);
    assert_eq!(interp.position(), Position::new(GRID_WIDTH as i64 - 1, 0));
}

#[test]
fn test_pointer_wraps_vertically() {
    let mut interp = interpreter("^");
    interp.step().unwrap();
    assert_eq!(interp.position(), Position::new(0, GRID_HEIGHT as i64 - 1));

    let mut interp = interpreter("v");
    interp.set_position(0, GRID_HEIGHT as i64 - 1);
    interp.write_current(b'v' as Cell);
    interp.step().unwrap();
    assert_eq!(interp.position(), Position::new(0, 0));
}

#[test]
fn test_string_mode_pushes_raw_values() {
    let mut interp = interpreter("\"ab\"1");
    interp.step().unwrap();
    assert!(interp.is_string_mode());

    run_steps(&mut interp, 3);
    assert!(!interp.is_string_mode());
    assert_eq!(interp.stack().values(), &[b'a' as Cell, b'b' as Cell]);

    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[b'a' as Cell, b'b' as Cell, 1]);
}

#[test]
fn test_string_mode_does_not_execute() {
    let mut interp = interpreter("\"@\"");
    run_steps(&mut interp, 3);
    assert!(!interp.is_halted());
    assert_eq!(interp.stack().values(), &[b'@' as Cell]);
}

#[test]
fn test_bridge_skips_one_cell() {
    let mut interp = interpreter("#12");
    interp.step().unwrap();
    assert_eq!(interp.position(), Position::new(2, 0));
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[2]);
}

#[test]
fn test_horizontal_if() {
    let mut interp = interpreter("1_");
    run_steps(&mut interp, 2);
    assert_eq!(interp.direction(), Direction::Left);
    assert!(interp.stack().is_empty());

    let mut interp = interpreter("_");
    interp.step().unwrap();
    assert_eq!(interp.direction(), Direction::Right);
}

#[test]
fn test_vertical_if() {
    let mut interp = interpreter("1|");
    run_steps(&mut interp, 2);
    assert_eq!(interp.direction(), Direction::Up);

    let mut interp = interpreter("|");
    interp.step().unwrap();
    assert_eq!(interp.direction(), Direction::Down);
    assert_eq!(interp.position(), Position::new(0, 1));
}

#[test]
fn test_swap() {
    let mut interp = interpreter("12\\");
    run_steps(&mut interp, 3);
    assert_eq!(interp.stack().values(), &[2, 1]);
}

#[test]
fn test_put_and_get() {
    let mut interp = interpreter("910p10g");
    run_steps(&mut interp, 4);
    assert_eq!(interp.grid().get(1, 0), 9);
    assert!(interp.stack().is_empty());

    run_steps(&mut interp, 3);
    // (1, 0) now holds 9
    assert_eq!(interp.stack().values(), &[9]);
}

#[test]
fn test_put_wraps_coordinates() {
    let mut interp = interpreter("7");
    interp.stack_mut().push(42).unwrap();
    interp.stack_mut().push(-1).unwrap();
    interp.stack_mut().push(-1).unwrap();
    interp.write_current(b'p' as Cell);
    interp.step().unwrap();

    assert_eq!(
        interp.grid().get(GRID_WIDTH as i64 - 1, GRID_HEIGHT as i64 - 1),
        42
    );
}

#[test]
fn test_placeholders_and_unknown_cells_are_noops() {
    let mut interp = interpreter(".,&~x ");
    interp.stack_mut().push(3).unwrap();
    run_steps(&mut interp, 6);

    assert_eq!(interp.stack().values(), &[3]);
    assert_eq!(interp.position(), Position::new(6, 0));
    assert!(!interp.is_halted());
}

#[test]
fn test_stack_overflow_halts() {
    let mut interp = interpreter_with_limit("123", 2);
    run_steps(&mut interp, 2);

    let err = interp.step().unwrap_err();
    assert!(matches!(err, RuntimeError::StackOverflow { limit: 2, .. }));
    assert!(err.is_fatal());
    assert!(interp.is_halted());
    assert_eq!(interp.stack().values(), &[1, 2]);
}

#[test]
fn test_random_direction_is_seeded() {
    let directions = |seed: u64| {
        let (grid, _) = Grid::from_text("?", GRID_WIDTH, GRID_HEIGHT);
        let mut interp = Interpreter::new(grid, 16, Box::new(StdRng::seed_from_u64(seed)));
        (0..200)
            .map(|_| {
                interp.set_position(0, 0);
                interp.step().unwrap();
                interp.direction()
            })
            .collect::<Vec<_>>()
    };

    let first = directions(42);
    assert_eq!(first, directions(42));
    for d in Direction::ALL {
        assert!(first.contains(&d), "{:?} never chosen", d);
    }
}

#[test]
fn test_wrapping_arithmetic() {
    let mut interp = interpreter("*");
    interp.stack_mut().push(i64::MAX).unwrap();
    interp.stack_mut().push(2).unwrap();
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[i64::MAX.wrapping_mul(2)]);

    let mut interp = interpreter("/");
    interp.stack_mut().push(i64::MIN).unwrap();
    interp.stack_mut().push(-1).unwrap();
    interp.step().unwrap();
    assert_eq!(interp.stack().values(), &[i64::MIN]);
}

#[test]
fn test_grid_is_toroidal() {
    let mut grid = Grid::default();
    for i in 0..GRID_WIDTH as i64 {
        grid.set(i, i * 3, i * 7 - 50);
    }

    let w = GRID_WIDTH as i64;
    let h = GRID_HEIGHT as i64;
    for x in -3..w + 3 {
        for y in [-h, -1, 0, 5, h - 1, h, 2 * h + 1] {
            assert_eq!(grid.get(x + w, y), grid.get(x, y));
            assert_eq!(grid.get(x, y + h), grid.get(x, y));
        }
    }
}

#[test]
fn test_loop_program_counts_down() {
    // count down from 3, leave the final zero and halt
    let source = "3>: v\n ^-1_@";
    let mut interp = interpreter(source);
    let mut steps = 0;
    while !interp.is_halted() {
        interp.step().expect("step failed");
        steps += 1;
        assert!(steps < 1000, "program did not halt");
    }
    assert_eq!(interp.stack().values(), &[0]);
}
