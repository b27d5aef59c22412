//! Two passes over the instruction stream: first register every
//! `LabelDefine` in a fresh table (so a label can be referenced before its
//! definition is reached), then a single walk that pairs each
//! `LabelDefine` with its `EndRoutine` via an auxiliary LIFO stack of open
//! labels and resolves every `Call`/`Jump`/`ZeroJump`/`MinusJump` target
//! against the table. The Rust analogue of original_source's `setRelation`
//! in `prepare.c`: label registration happens incrementally as `prepare.c`'s
//! parsing loop runs (ahead of `setRelation`), but the open/close LIFO
//! bookkeeping itself is one true forward pass — push on `LABEL_DEFINE`,
//! pop on `END_ROUTINE`, interleaved in textual order, not split across two
//! passes. Splitting the open/close bookkeeping across two passes would
//! mis-pair sibling (non-nested) subroutines: pushing every `LabelDefine`
//! before popping any `EndRoutine` makes the stack LIFO order diverge from
//! textual order as soon as more than one label closes before the next one
//! opens.

use wsvm::{Command, FlowOp, Instruction, LabelTable};

use crate::error::LinkError;

/// Links `instructions` in place: populates a fresh [`LabelTable`] from
/// every `LabelDefine`, pairs each with its `EndRoutine` via an auxiliary
/// LIFO stack of open labels, and resolves every `Call`/`Jump`/`ZeroJump`/
/// `MinusJump` target against the table.
pub fn link(instructions: &mut [Instruction]) -> Result<LabelTable, LinkError> {
    let mut labels = LabelTable::new();

    for index in 0..instructions.len() {
        let command = instructions[index].command;
        if let Command::Flow(FlowOp::LabelDefine) = command {
            let key = instructions[index]
                .param
                .as_label()
                .expect("LabelDefine always carries a label parameter")
                .clone();
            labels.define(key, index);
        }
    }

    let mut open = Vec::new();
    for index in 0..instructions.len() {
        let command = instructions[index].command;
        if let Command::Flow(op) = command {
            match op {
                FlowOp::LabelDefine => open.push(index),
                FlowOp::EndRoutine => {
                    let opener = open.pop().ok_or(LinkError::UnmatchedEndRoutine)?;
                    instructions[opener].jump = Some(index);
                }
                FlowOp::CallRoutine | FlowOp::Jump | FlowOp::ZeroJump | FlowOp::MinusJump => {
                    let key = instructions[index]
                        .param
                        .as_label()
                        .expect("these opcodes always carry a label parameter")
                        .clone();
                    let target = labels.resolve(&key).ok_or(LinkError::UnresolvedLabel)?;
                    instructions[index].jump = Some(target);
                }
                FlowOp::Finish => {}
            }
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod test {
    use super::*;
    use wsvm::{HeapOp, Imp, Param, StackOp};

    fn flow(op: FlowOp, param: Param) -> Instruction {
        Instruction::new(Imp::FlowControl, Command::Flow(op), param)
    }

    fn label_key(bits: &[bool]) -> wsvm::LabelKey {
        bits.iter().copied().collect()
    }

    #[test]
    fn resolves_a_forward_jump() {
        let mut instructions = vec![
            flow(FlowOp::Jump, Param::Label(label_key(&[true]))),
            flow(FlowOp::LabelDefine, Param::Label(label_key(&[true]))),
            flow(FlowOp::EndRoutine, Param::None),
        ];
        let labels = link(&mut instructions).unwrap();
        assert_eq!(instructions[0].jump, Some(1));
        assert_eq!(instructions[1].jump, Some(2));
        assert_eq!(labels.resolve(&label_key(&[true])), Some(1));
    }

    #[test]
    fn unresolved_label_is_an_error() {
        let mut instructions = vec![flow(FlowOp::Jump, Param::Label(label_key(&[false])))];
        assert_eq!(link(&mut instructions).unwrap_err(), LinkError::UnresolvedLabel);
    }

    #[test]
    fn unmatched_end_routine_is_an_error() {
        let mut instructions = vec![flow(FlowOp::EndRoutine, Param::None)];
        assert_eq!(
            link(&mut instructions).unwrap_err(),
            LinkError::UnmatchedEndRoutine
        );
    }

    #[test]
    fn nested_label_redefinition_overwrites_for_the_remainder() {
        // outer label define ... inner (same key) label define ... inner end ... outer end
        let key = label_key(&[true, false]);
        let mut instructions = vec![
            flow(FlowOp::LabelDefine, Param::Label(key.clone())), // 0
            flow(FlowOp::LabelDefine, Param::Label(key.clone())), // 1: redefinition
            flow(FlowOp::EndRoutine, Param::None),                // 2: pairs with 1
            flow(FlowOp::EndRoutine, Param::None),                // 3: pairs with 0
            flow(FlowOp::Jump, Param::Label(key.clone())),        // 4: resolves to the latest def
        ];
        let labels = link(&mut instructions).unwrap();
        assert_eq!(instructions[0].jump, Some(3));
        assert_eq!(instructions[1].jump, Some(2));
        assert_eq!(labels.resolve(&key), Some(1));
        assert_eq!(instructions[4].jump, Some(1));
    }

    #[test]
    fn sequential_sibling_labels_pair_with_their_own_end_routine() {
        // label a ... end a; label b ... end b — a fully closes before b opens.
        let a = label_key(&[false]);
        let b = label_key(&[true]);
        let mut instructions = vec![
            flow(FlowOp::LabelDefine, Param::Label(a.clone())), // 0
            flow(FlowOp::EndRoutine, Param::None),              // 1: pairs with 0
            flow(FlowOp::LabelDefine, Param::Label(b.clone())), // 2
            flow(FlowOp::EndRoutine, Param::None),              // 3: pairs with 2
        ];
        link(&mut instructions).unwrap();
        assert_eq!(instructions[0].jump, Some(1));
        assert_eq!(instructions[2].jump, Some(3));
    }

    #[test]
    fn non_flow_instructions_are_untouched() {
        let mut instructions = vec![Instruction::new(
            Imp::Heap,
            Command::Heap(HeapOp::ToStack),
            Param::None,
        )];
        link(&mut instructions).unwrap();
        assert_eq!(instructions[0].jump, None);
    }

    #[test]
    fn push_number_is_untouched_by_linking() {
        let mut instructions = vec![Instruction::new(
            Imp::Stack,
            Command::Stack(StackOp::PushNumber),
            Param::Number(7),
        )];
        link(&mut instructions).unwrap();
        assert_eq!(instructions[0].jump, None);
    }
}
