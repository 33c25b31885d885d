//! Nested instruction model produced by the linearizer.

use std::fmt::{self, Display, Formatter};

/// Which operand slot a node occupies in its parent, selecting the register
/// family (`x` for the root, `y` for left operands, `z` for right operands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Root,
    Left,
    Right,
}

impl Branch {
    /// Maps the numeric selector `0`, `1`, `2` to a branch.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => Some(Branch::Root),
            1 => Some(Branch::Left),
            2 => Some(Branch::Right),
            _ => None,
        }
    }

    pub fn family(self) -> char {
        match self {
            Branch::Root => 'x',
            Branch::Left => 'y',
            Branch::Right => 'z',
        }
    }
}

/// A synthetic register: the branch family character repeated
/// `array_depth + 1` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub branch: Branch,
    pub array_depth: usize,
}

impl Register {
    pub fn new(branch: Branch, array_depth: usize) -> Self {
        Self { branch, array_depth }
    }

    pub fn root() -> Self {
        Self::new(Branch::Root, 0)
    }

    /// The register of an operand one array level deeper in the same family.
    pub fn deeper(self) -> Self {
        Self::new(self.branch, self.array_depth + 1)
    }

    /// The register of an operand at the same array depth on `branch`.
    pub fn operand(self, branch: Branch) -> Self {
        Self::new(branch, self.array_depth)
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let family = self.branch.family();
        (0..=self.array_depth).try_for_each(|_| write!(f, "{}", family))
    }
}

/// A single `target = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub value: String,
}

impl Assignment {
    pub fn new(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Assign(Assignment),
    Block(Block),
}

/// An ordered, possibly nested, list of instructions.
///
/// Sub-blocks follow the line that uses their registers, so reading a block
/// back to front yields definitions before uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block(Vec<Instruction>);

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_assign(&mut self, assignment: Assignment) {
        self.0.push(Instruction::Assign(assignment));
    }

    pub fn push_block(&mut self, block: Block) {
        self.0.push(Instruction::Block(block));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattened lines in emission order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.for_each_reversed(&mut |assignment| lines.push(assignment.to_string()));
        lines
    }

    /// The text the flattening writer produces for this block.
    pub fn to_program(&self) -> String {
        let mut program = String::new();
        self.for_each_reversed(&mut |assignment| {
            program.push_str(&assignment.to_string());
            program.push('\n');
        });
        program
    }

    /// Visits every assignment, last element first, descending into
    /// sub-blocks as they are met.
    pub(crate) fn for_each_reversed<F: FnMut(&Assignment)>(&self, f: &mut F) {
        for instruction in self.0.iter().rev() {
            match instruction {
                Instruction::Assign(assignment) => f(assignment),
                Instruction::Block(block) => block.for_each_reversed(f),
            }
        }
    }
}

impl From<Vec<Instruction>> for Block {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
