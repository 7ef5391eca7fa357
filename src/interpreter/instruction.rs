// Instruction decoding

use super::constants::Cell;

/// Every cell value the interpreter recognizes as an instruction
///
/// Cells that decode to `None` are executed as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Digit(u8),
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Not,
    Greater,
    Right,
    Left,
    Up,
    Down,
    Random,
    HorizontalIf,
    VerticalIf,
    StringMode,
    Duplicate,
    Swap,
    Discard,
    Bridge,
    Get,
    Put,
    Stop,
    // Recognized but not implemented: they execute as no-ops
    OutputInt,
    OutputChar,
    InputInt,
    InputChar,
}

impl Instruction {
    pub fn decode(cell: Cell) -> Option<Instruction> {
        let byte = u8::try_from(cell).ok()?;
        let instr = match byte {
            b'0'..=b'9' => Instruction::Digit(byte - b'0'),
            b'+' => Instruction::Add,
            b'-' => Instruction::Subtract,
            b'*' => Instruction::Multiply,
            b'/' => Instruction::Divide,
            b'%' => Instruction::Modulo,
            b'!' => Instruction::Not,
            b'`' => Instruction::Greater,
            b'>' => Instruction::Right,
            b'<' => Instruction::Left,
            b'^' => Instruction::Up,
            b'v' => Instruction::Down,
            b'?' => Instruction::Random,
            b'_' => Instruction::HorizontalIf,
            b'|' => Instruction::VerticalIf,
            b'"' => Instruction::StringMode,
            b':' => Instruction::Duplicate,
            b'\\' => Instruction::Swap,
            b'$' => Instruction::Discard,
            b'#' => Instruction::Bridge,
            b'g' => Instruction::Get,
            b'p' => Instruction::Put,
            b'@' => Instruction::Stop,
            b'.' => Instruction::OutputInt,
            b',' => Instruction::OutputChar,
            b'&' => Instruction::InputInt,
            b'~' => Instruction::InputChar,
            _ => return None,
        };
        Some(instr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_digits() {
        assert_eq!(Instruction::decode(b'0' as Cell), Some(Instruction::Digit(0)));
        assert_eq!(Instruction::decode(b'9' as Cell), Some(Instruction::Digit(9)));
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(Instruction::decode(b' ' as Cell), None);
        assert_eq!(Instruction::decode(b'x' as Cell), None);
        assert_eq!(Instruction::decode(-1), None);
        // '+' in the low byte must not alias
        assert_eq!(Instruction::decode(0x100 + b'+' as Cell), None);
    }

    #[test]
    fn test_decode_placeholders() {
        assert_eq!(Instruction::decode(b'.' as Cell), Some(Instruction::OutputInt));
        assert_eq!(Instruction::decode(b'~' as Cell), Some(Instruction::InputChar));
    }
}
