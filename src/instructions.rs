//! The turtle instruction language.
//!
//! Instructions are a small recursive tree: movement and rotation relative
//! to the turtle's current heading, pen state changes, and nested groups.
//! Programs are flattened to a leaf-only sequence before compilation.
//!
//! An unknown `"type"` tag in a program file is rejected by serde at the
//! JSON boundary; the variant set is closed after that.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// Move along the current heading. Negative = backward.
    Move { distance: f64 },
    /// Change the heading. Positive = right (clockwise on screen).
    Rotate { degrees: f64 },
    /// Raise or lower the pen.
    Pen { down: bool },
    /// An ordered sub-sequence, nestable to arbitrary depth.
    Group { items: Vec<Instruction> },
}

impl Instruction {
    pub fn forward(distance: f64) -> Self {
        Instruction::Move { distance }
    }

    pub fn back(distance: f64) -> Self {
        Instruction::Move { distance: -distance }
    }

    pub fn right(degrees: f64) -> Self {
        Instruction::Rotate { degrees }
    }

    pub fn left(degrees: f64) -> Self {
        Instruction::Rotate { degrees: -degrees }
    }

    pub fn pen_down() -> Self {
        Instruction::Pen { down: true }
    }

    pub fn pen_up() -> Self {
        Instruction::Pen { down: false }
    }

    pub fn group(items: Vec<Instruction>) -> Self {
        Instruction::Group { items }
    }
}

/// Replicate an instruction sequence `count` times, as a single group.
pub fn repeat(count: usize, items: Vec<Instruction>) -> Instruction {
    let mut repeated = Vec::with_capacity(count * items.len());
    for _ in 0..count {
        repeated.extend(items.iter().cloned());
    }
    Instruction::Group { items: repeated }
}

/// Expand all nested groups into a single leaf-only sequence, depth-first,
/// preserving order.
pub fn flatten(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut flat = Vec::new();
    flatten_into(instructions, &mut flat);
    flat
}

fn flatten_into(instructions: &[Instruction], flat: &mut Vec<Instruction>) {
    for instruction in instructions {
        match instruction {
            Instruction::Group { items } => flatten_into(items, flat),
            leaf => flat.push(leaf.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_resolves_nested_groups_depth_first() {
        let tree = vec![
            Instruction::pen_down(),
            Instruction::group(vec![
                Instruction::forward(10.0),
                Instruction::group(vec![Instruction::right(90.0), Instruction::forward(5.0)]),
                Instruction::left(45.0),
            ]),
            Instruction::pen_up(),
        ];

        let flat = flatten(&tree);
        assert_eq!(
            flat,
            vec![
                Instruction::pen_down(),
                Instruction::forward(10.0),
                Instruction::right(90.0),
                Instruction::forward(5.0),
                Instruction::left(45.0),
                Instruction::pen_up(),
            ]
        );
    }

    #[test]
    fn flatten_never_yields_a_group() {
        let deep = vec![Instruction::group(vec![Instruction::group(vec![
            Instruction::group(vec![Instruction::forward(1.0)]),
        ])])];
        let flat = flatten(&deep);
        assert!(flat.iter().all(|i| !matches!(i, Instruction::Group { .. })));
    }

    #[test]
    fn flatten_leaves_a_leaf_sequence_unchanged() {
        let leaves = vec![
            Instruction::forward(1.0),
            Instruction::right(90.0),
            Instruction::pen_down(),
        ];
        assert_eq!(flatten(&leaves), leaves);
    }

    #[test]
    fn repeat_replicates_in_order() {
        let square = repeat(4, vec![Instruction::forward(50.0), Instruction::right(90.0)]);
        let flat = flatten(&[square]);
        assert_eq!(flat.len(), 8);
        assert_eq!(flat[0], Instruction::forward(50.0));
        assert_eq!(flat[7], Instruction::right(90.0));
    }

    #[test]
    fn back_and_left_negate_their_arguments() {
        assert_eq!(Instruction::back(3.0), Instruction::Move { distance: -3.0 });
        assert_eq!(Instruction::left(30.0), Instruction::Rotate { degrees: -30.0 });
    }

    #[test]
    fn unknown_instruction_kind_is_rejected_at_parse() {
        let err = serde_json::from_str::<Instruction>(r#"{ "type": "teleport", "distance": 3 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn instructions_round_trip_through_json() {
        let original = Instruction::group(vec![
            Instruction::pen_down(),
            Instruction::forward(12.5),
            Instruction::left(90.0),
        ]);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
