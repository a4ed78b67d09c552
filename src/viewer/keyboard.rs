//! Key → navigation action mapping.
//!
//! Keys use the DOM `KeyboardEvent.key` names.

use serde::{Deserialize, Serialize};

/// Edge reached by a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JumpTarget {
    RowStart,
    RowEnd,
    ColumnTop,
    ColumnBottom,
    /// Top-start cell of the table
    TableStart,
    /// Bottom-end cell of the table
    TableEnd,
}

/// Selection change requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum NavAction {
    /// Move the highlight (collapses the range)
    #[serde(rename_all = "camelCase")]
    Move {
        rows: isize,
        cols: isize,
        create_missing: bool,
    },
    /// Move the range end
    Extend { rows: isize, cols: isize },
    /// Jump the highlight (or the range end when `extend`) to an edge
    Jump { target: JumpTarget, extend: bool },
}

/// Map a key press to a navigation action; `None` for keys the grid ignores.
pub fn action_for_key(key: &str, ctrl: bool, shift: bool) -> Option<NavAction> {
    let arrow = match key {
        "ArrowUp" => Some((-1, 0, JumpTarget::ColumnTop)),
        "ArrowDown" => Some((1, 0, JumpTarget::ColumnBottom)),
        "ArrowLeft" => Some((0, -1, JumpTarget::RowStart)),
        "ArrowRight" => Some((0, 1, JumpTarget::RowEnd)),
        _ => None,
    };
    if let Some((rows, cols, target)) = arrow {
        return Some(if ctrl {
            NavAction::Jump {
                target,
                extend: shift,
            }
        } else if shift {
            NavAction::Extend { rows, cols }
        } else {
            NavAction::Move {
                rows,
                cols,
                create_missing: false,
            }
        });
    }

    let step = if shift { -1 } else { 1 };
    match key {
        "Tab" if !ctrl => Some(NavAction::Move {
            rows: 0,
            cols: step,
            create_missing: true,
        }),
        "Enter" if !ctrl => Some(NavAction::Move {
            rows: step,
            cols: 0,
            create_missing: true,
        }),
        "Home" => Some(NavAction::Jump {
            target: if ctrl {
                JumpTarget::TableStart
            } else {
                JumpTarget::RowStart
            },
            extend: shift,
        }),
        "End" => Some(NavAction::Jump {
            target: if ctrl {
                JumpTarget::TableEnd
            } else {
                JumpTarget::RowEnd
            },
            extend: shift,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows() {
        assert_eq!(
            action_for_key("ArrowRight", false, false),
            Some(NavAction::Move {
                rows: 0,
                cols: 1,
                create_missing: false
            })
        );
        assert_eq!(
            action_for_key("ArrowUp", false, true),
            Some(NavAction::Extend { rows: -1, cols: 0 })
        );
        assert_eq!(
            action_for_key("ArrowLeft", true, false),
            Some(NavAction::Jump {
                target: JumpTarget::RowStart,
                extend: false
            })
        );
    }

    #[test]
    fn test_tab_and_enter_grow() {
        assert_eq!(
            action_for_key("Tab", false, true),
            Some(NavAction::Move {
                rows: 0,
                cols: -1,
                create_missing: true
            })
        );
        assert_eq!(
            action_for_key("Enter", false, false),
            Some(NavAction::Move {
                rows: 1,
                cols: 0,
                create_missing: true
            })
        );
        assert_eq!(action_for_key("Tab", true, false), None);
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(action_for_key("a", false, false), None);
        assert_eq!(action_for_key("Escape", true, true), None);
    }
}
