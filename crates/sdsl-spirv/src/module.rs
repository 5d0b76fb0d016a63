//! Finished modules.

use alloc::vec::Vec;
use core::fmt;

use crate::{id::Id, inst::Inst};

/// A compiled module: the instruction stream plus its id bound.
///
/// `bound` is one past the largest id in use, as in a SPIR-V header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Next unused id
    pub bound: u32,
    /// Instructions in emission order
    pub instructions: Vec<Inst>,
}

impl Module {
    /// Create a module from its parts.
    pub fn new(bound: u32, instructions: Vec<Inst>) -> Self {
        Self {
            bound,
            instructions,
        }
    }

    /// Iterate over every id defined by an instruction.
    pub fn result_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.instructions.iter().filter_map(Inst::result_id)
    }

    /// Count instructions with the given opcode name.
    pub fn count_opcode(&self, opcode_name: &str) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.opcode_name() == opcode_name)
            .count()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; Bound: {}", self.bound)?;
        for inst in &self.instructions {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;

    #[test]
    fn test_module_display() {
        let module = Module::new(
            3,
            vec![
                Inst::TypeVoid { result: Id::new(1) },
                Inst::TypeFunction {
                    result: Id::new(2),
                    return_type: Id::new(1),
                    params: vec![],
                },
            ],
        );
        assert_eq!(
            format!("{}", module),
            "; Bound: 3\n%1 = OpTypeVoid\n%2 = OpTypeFunction %1\n"
        );
    }

    #[test]
    fn test_module_queries() {
        let module = Module::new(
            3,
            vec![
                Inst::TypeVoid { result: Id::new(1) },
                Inst::Label { result: Id::new(2) },
                Inst::Return,
            ],
        );
        let ids: Vec<_> = module.result_ids().collect();
        assert_eq!(ids, vec![Id::new(1), Id::new(2)]);
        assert_eq!(module.count_opcode("OpReturn"), 1);
        assert_eq!(module.count_opcode("OpFunctionEnd"), 0);
    }
}
