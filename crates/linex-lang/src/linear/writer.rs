use std::io::{self, Write};

use super::instruction::{Block, Instruction};

/// Writes the lines of `block` to `sink`, one per line, so that every
/// register is assigned before the line that reads it.
///
/// Elements are visited last to first and nested blocks are flattened in
/// place.
pub fn flatten_write<W: Write>(block: &Block, sink: &mut W) -> io::Result<()> {
    for instruction in block.iter().rev() {
        match instruction {
            Instruction::Assign(assignment) => {
                log::trace!("emit `{}`", assignment);
                writeln!(sink, "{}", assignment)?;
            }
            Instruction::Block(inner) => flatten_write(inner, sink)?,
        }
    }

    Ok(())
}
