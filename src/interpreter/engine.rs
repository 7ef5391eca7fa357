// Execution engine for the Befunge-style interpreter

use super::constants::{Cell, DEFAULT_STACK_LIMIT};
use super::errors::RuntimeError;
use super::instruction::Instruction;
use crate::memory::grid::Grid;
use crate::memory::stack::Stack;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;

/// Instruction pointer position, always normalized into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Position { x, y }
    }
}

/// One of the four cardinal directions the pointer can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Order used when `?` picks a direction
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The `(dx, dy)` unit step for this direction (y grows downward)
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Right => '→',
            Direction::Left => '←',
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }
}

/// Result of a successful [`Interpreter::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction ran and the pointer moved on
    Continued,
    /// The engine is halted (either just now, or it already was)
    Halted,
}

/// The interpreter: program grid, operand stack and instruction pointer
pub struct Interpreter {
    /// Program memory (code and data)
    grid: Grid,

    /// Operand stack
    stack: Stack,

    /// Current pointer position
    position: Position,

    /// Direction the pointer advances in after each step
    direction: Direction,

    /// Whether cells are currently pushed verbatim instead of executed
    string_mode: bool,

    /// Set by `@`; cleared by reset or a program reload
    halted: bool,

    /// Source of randomness for `?`
    rng: Box<dyn RngCore + Send>,

    /// Number of steps executed since the last reset
    steps: u64,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("string_mode", &self.string_mode)
            .field("halted", &self.halted)
            .field("stack", &self.stack.values())
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Create an interpreter over `grid` with the given stack limit and random source
    pub fn new(grid: Grid, stack_limit: usize, rng: Box<dyn RngCore + Send>) -> Self {
        Interpreter {
            grid,
            stack: Stack::with_limit(stack_limit),
            position: Position::default(),
            direction: Direction::Right,
            string_mode: false,
            halted: false,
            rng,
            steps: 0,
        }
    }

    /// Create an interpreter over a blank default-sized grid with a seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Interpreter::new(
            Grid::default(),
            DEFAULT_STACK_LIMIT,
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_string_mode(&self) -> bool {
        self.string_mode
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Value of the cell under the pointer
    pub fn current_cell(&self) -> Cell {
        self.grid.get(self.position.x, self.position.y)
    }

    /// Move the pointer to `(x, y)`, wrapping onto the grid
    pub fn set_position(&mut self, x: i64, y: i64) {
        let (x, y) = self.grid.wrap(x, y);
        self.position = Position::new(x as i64, y as i64);
    }

    /// Point in `direction` and move one cell without executing anything
    pub fn navigate(&mut self, direction: Direction) {
        self.direction = direction;
        self.advance();
    }

    /// Overwrite the cell under the pointer
    pub fn write_current(&mut self, value: Cell) {
        self.grid.set(self.position.x, self.position.y, value);
    }

    /// Return to the initial execution state, keeping the program
    pub fn reset(&mut self) {
        self.stack.clear();
        self.position = Position::default();
        self.direction = Direction::Right;
        self.string_mode = false;
        self.halted = false;
        self.steps = 0;
    }

    /// Swap in a freshly loaded program; the engine becomes steppable again
    pub fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.string_mode = false;
        self.halted = false;
        // keep the pointer inside the new shape
        self.set_position(self.position.x, self.position.y);
    }

    /// Execute the cell under the pointer and advance
    ///
    /// A halted engine does nothing and reports [`StepOutcome::Halted`]; `@`
    /// leaves the pointer on itself. A division by zero consumes its operands,
    /// pushes nothing, moves the pointer on, and is returned as an error
    /// without halting.
    pub fn step(&mut self) -> Result<StepOutcome, RuntimeError> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }

        let cell = self.current_cell();
        let result = if self.string_mode {
            if cell == b'"' as Cell {
                self.string_mode = false;
                Ok(())
            } else {
                self.push(cell)
            }
        } else {
            match Instruction::decode(cell) {
                Some(instr) => self.execute(instr),
                None => Ok(()),
            }
        };
        self.steps += 1;

        if self.halted {
            return result.map(|()| StepOutcome::Halted);
        }
        self.advance();
        result.map(|()| StepOutcome::Continued)
    }

    /// Move the pointer one cell along the current direction
    pub fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        self.set_position(self.position.x + dx, self.position.y + dy);
    }

    fn execute(&mut self, instr: Instruction) -> Result<(), RuntimeError> {
        match instr {
            Instruction::Digit(d) => self.push(d as Cell),
            Instruction::Add => self.binary_op(|a, b| a.wrapping_add(b)),
            Instruction::Subtract => self.binary_op(|a, b| a.wrapping_sub(b)),
            Instruction::Multiply => self.binary_op(|a, b| a.wrapping_mul(b)),
            Instruction::Divide => self.checked_division('/'),
            Instruction::Modulo => self.checked_division('%'),
            Instruction::Not => {
                let v = self.stack.pop();
                self.push(if v == 0 { 1 } else { 0 })
            }
            Instruction::Greater => self.binary_op(|a, b| if a > b { 1 } else { 0 }),
            Instruction::Right => {
                self.direction = Direction::Right;
                Ok(())
            }
            Instruction::Left => {
                self.direction = Direction::Left;
                Ok(())
            }
            Instruction::Up => {
                self.direction = Direction::Up;
                Ok(())
            }
            Instruction::Down => {
                self.direction = Direction::Down;
                Ok(())
            }
            Instruction::Random => {
                self.direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
                Ok(())
            }
            Instruction::HorizontalIf => {
                self.direction = if self.stack.pop() != 0 {
                    Direction::Left
                } else {
                    Direction::Right
                };
                Ok(())
            }
            Instruction::VerticalIf => {
                self.direction = if self.stack.pop() != 0 {
                    Direction::Up
                } else {
                    Direction::Down
                };
                Ok(())
            }
            Instruction::StringMode => {
                self.string_mode = true;
                Ok(())
            }
            Instruction::Duplicate => {
                let a = self.stack.pop();
                self.push(a)?;
                self.push(a)
            }
            Instruction::Swap => {
                let b = self.stack.pop();
                let a = self.stack.pop();
                self.push(b)?;
                self.push(a)
            }
            Instruction::Discard => {
                self.stack.pop();
                Ok(())
            }
            Instruction::Bridge => {
                self.advance();
                Ok(())
            }
            Instruction::Get => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let value = self.grid.get(x, y);
                self.push(value)
            }
            Instruction::Put => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let v = self.stack.pop();
                self.grid.set(x, y, v);
                Ok(())
            }
            Instruction::Stop => {
                self.halted = true;
                tracing::debug!(
                    x = self.position.x,
                    y = self.position.y,
                    steps = self.steps + 1,
                    "program halted"
                );
                Ok(())
            }
            Instruction::OutputInt
            | Instruction::OutputChar
            | Instruction::InputInt
            | Instruction::InputChar => Ok(()),
        }
    }

    /// Pop `b`, pop `a`, push `f(a, b)`
    fn binary_op(&mut self, f: impl FnOnce(Cell, Cell) -> Cell) -> Result<(), RuntimeError> {
        let b = self.stack.pop();
        let a = self.stack.pop();
        self.push(f(a, b))
    }

    fn checked_division(&mut self, operation: char) -> Result<(), RuntimeError> {
        let b = self.stack.pop();
        let a = self.stack.pop();
        if b == 0 {
            tracing::warn!(
                x = self.position.x,
                y = self.position.y,
                dividend = a,
                "{} by zero",
                operation
            );
            return Err(RuntimeError::DivisionByZero {
                operation,
                dividend: a,
                position: self.position,
            });
        }
        let value = if operation == '%' {
            a.wrapping_rem(b)
        } else {
            a.wrapping_div(b)
        };
        self.push(value)
    }

    fn push(&mut self, value: Cell) -> Result<(), RuntimeError> {
        self.stack.push(value).map_err(|e| {
            self.halted = true;
            tracing::error!(
                x = self.position.x,
                y = self.position.y,
                limit = e.limit,
                "operand stack overflow, halting"
            );
            RuntimeError::StackOverflow {
                limit: e.limit,
                position: self.position,
            }
        })
    }
}
