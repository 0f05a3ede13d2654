//! Canned answers for the help box.

type Rule = (fn(&str) -> bool, &'static str);

/// Evaluated top to bottom; the first matching rule answers.
const RULES: &[Rule] = &[
    (
        |q: &str| q.contains("balance"),
        "Use the 'Check Balance' option to view your account balance.",
    ),
    (
        |q: &str| q.contains("deposit"),
        "Deposit money using the 'Deposit Cash' option.",
    ),
    (
        |q: &str| q.contains("withdraw"),
        "Withdraw cash with the 'Withdraw Cash' option.",
    ),
    (
        |q: &str| q.contains("pin"),
        "Your PIN keeps your account secure. Never share it with anyone.",
    ),
    (
        |q: &str| q.contains("account"),
        "Create, access, or manage your account easily through this ATM system.",
    ),
];

pub(crate) const FALLBACK: &str =
    "Sorry, I can only answer questions about balance, deposit, withdraw, PIN, or account.";

pub(crate) fn respond(question: &str) -> &'static str {
    let question = question.trim().to_lowercase();
    RULES
        .iter()
        .find(|(applies, _)| applies(&question))
        .map_or(FALLBACK, |&(_, answer)| answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("How do I check my BALANCE?", RULES[0].1 ; "balance ignores case")]
    #[test_case("  deposit  ", RULES[1].1 ; "deposit trims")]
    #[test_case("can I withdraw money", RULES[2].1 ; "withdraw")]
    #[test_case("what is my pin for this account", RULES[3].1 ; "pin beats account")]
    #[test_case("open an account", RULES[4].1 ; "account")]
    #[test_case("deposit to my balance", RULES[0].1 ; "balance beats deposit")]
    #[test_case("what's the weather", FALLBACK ; "fallback")]
    #[test_case("", FALLBACK ; "empty")]
    fn first_matching_rule_answers(question: &str, answer: &str) {
        assert_eq!(respond(question), answer);
    }

    #[test]
    fn pin_answer_wording() {
        assert_eq!(
            respond("what is my pin for this account"),
            "Your PIN keeps your account secure. Never share it with anyone."
        );
    }
}
