//! Scripted player input for headless sessions.
//!
//! A script is a sequence of steps. Each step is one of `U`, `D`, `L`, `R`
//! (move), `F` (fire) or `.` (idle), optionally followed by a repeat count:
//! `R3 F .10` moves right for three ticks, fires once and idles for ten.
//! Whitespace and commas are ignored. Ticks past the end of the script idle.

use pirate_flow_core::{Facing, PlayerInput};
use thiserror::Error;

const MAX_REPEAT: usize = 100_000;

/// Inputs to feed the simulation, one per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    steps: Vec<PlayerInput>,
}

/// Errors raised while parsing an input script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The script contains a character that is not an input.
    #[error("unknown input `{symbol}` at offset {offset}")]
    UnknownInput {
        /// Offending character.
        symbol: char,
        /// Byte offset of the character.
        offset: usize,
    },
    /// A step was repeated zero times.
    #[error("repeat count of the step at offset {offset} must be positive")]
    ZeroRepeat {
        /// Byte offset of the step.
        offset: usize,
    },
    /// A repeat count exceeds the supported maximum.
    #[error("repeat count of the step at offset {offset} exceeds {MAX_REPEAT}")]
    RepeatTooLarge {
        /// Byte offset of the step.
        offset: usize,
    },
}

impl InputScript {
    pub(crate) fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, symbol)) = chars.next() {
            if symbol.is_whitespace() || symbol == ',' {
                continue;
            }

            let input = match symbol.to_ascii_uppercase() {
                'U' => PlayerInput::Move(Facing::Up),
                'D' => PlayerInput::Move(Facing::Down),
                'L' => PlayerInput::Move(Facing::Left),
                'R' => PlayerInput::Move(Facing::Right),
                'F' => PlayerInput::Fire,
                '.' => PlayerInput::Idle,
                _ => return Err(ScriptError::UnknownInput { symbol, offset }),
            };

            let mut repeat: Option<usize> = None;
            while let Some(digit) = chars.peek().and_then(|&(_, next)| next.to_digit(10)) {
                let _ = chars.next();
                let count = repeat.unwrap_or(0) * 10 + digit as usize;
                if count > MAX_REPEAT {
                    return Err(ScriptError::RepeatTooLarge { offset });
                }
                repeat = Some(count);
            }

            match repeat.unwrap_or(1) {
                0 => return Err(ScriptError::ZeroRepeat { offset }),
                count => steps.extend(std::iter::repeat(input).take(count)),
            }
        }

        Ok(Self { steps })
    }

    /// Input for the given tick.
    pub(crate) fn input_at(&self, tick: u64) -> PlayerInput {
        usize::try_from(tick)
            .ok()
            .and_then(|index| self.steps.get(index))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_counts_expand_steps() {
        let script = InputScript::parse("R3 f, .2").expect("script parses");

        assert_eq!(script.len(), 6);
        assert_eq!(script.input_at(0), PlayerInput::Move(Facing::Right));
        assert_eq!(script.input_at(2), PlayerInput::Move(Facing::Right));
        assert_eq!(script.input_at(3), PlayerInput::Fire);
        assert_eq!(script.input_at(5), PlayerInput::Idle);
    }

    #[test]
    fn ticks_past_the_end_idle() {
        let script = InputScript::parse("UUDD").expect("script parses");

        assert_eq!(script.input_at(3), PlayerInput::Move(Facing::Down));
        assert_eq!(script.input_at(4), PlayerInput::Idle);
        assert_eq!(InputScript::default().input_at(0), PlayerInput::Idle);
    }

    #[test]
    fn rejects_unknown_inputs_with_their_offset() {
        assert_eq!(
            InputScript::parse("R2 X"),
            Err(ScriptError::UnknownInput {
                symbol: 'X',
                offset: 3,
            })
        );
    }

    #[test]
    fn rejects_degenerate_repeat_counts() {
        assert_eq!(
            InputScript::parse("F L0"),
            Err(ScriptError::ZeroRepeat { offset: 2 })
        );
        assert_eq!(
            InputScript::parse("F999999"),
            Err(ScriptError::RepeatTooLarge { offset: 0 })
        );
    }
}
