//! Confirmation gate in front of destructive calls.

/// Asks the user a yes/no question.
pub trait Confirmer {
    /// `true` when the user agreed.
    fn confirm(&self, question: &str) -> bool;
}

/// The id to delete, or `None` when the user declined and nothing may be sent.
#[must_use]
pub fn gate_delete(confirmer: &dyn Confirmer, question: &str, id: i64) -> Option<i64> {
    confirmer.confirm(question).then_some(id)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Scripted {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl Confirmer for Scripted {
        fn confirm(&self, question: &str) -> bool {
            self.asked.borrow_mut().push(question.to_string());
            self.answer
        }
    }

    #[test]
    fn declined_prompt_yields_nothing_to_delete() {
        let confirmer = Scripted {
            answer: false,
            asked: RefCell::default(),
        };
        assert_eq!(gate_delete(&confirmer, "Delete?", 4), None);
        assert_eq!(confirmer.asked.borrow().as_slice(), ["Delete?"]);
    }

    #[test]
    fn accepted_prompt_passes_the_id_through() {
        let confirmer = Scripted {
            answer: true,
            asked: RefCell::default(),
        };
        assert_eq!(gate_delete(&confirmer, "Delete?", 4), Some(4));
    }
}
