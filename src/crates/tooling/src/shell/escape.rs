/// Quote `arg` as a single POSIX shell word.
///
/// The result is wrapped in single quotes; every embedded single quote is
/// written as `'"'"'` (close, double-quoted quote, reopen). Inside single
/// quotes the shell interprets nothing, so `$`, backticks, backslashes and
/// newlines pass through literally.
///
/// ```rust
/// use tooling::shell::escape_argument;
///
/// assert_eq!(escape_argument("it's"), r#"'it'"'"'s'"#);
/// ```
pub fn escape_argument(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            quoted.push_str("'\"'\"'");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::process::Command;

    /// Let a real shell split the quoted word and echo it back untouched.
    fn shell_round_trip(arg: &str) -> String {
        let line = format!("printf '%s' {}", escape_argument(arg));
        let output = Command::new("sh")
            .arg("-c")
            .arg(&line)
            .output()
            .expect("sh must be available for tests");
        assert!(output.status.success(), "sh rejected: {}", line);
        String::from_utf8(output.stdout).expect("utf-8 output")
    }

    /// Count the words the shell sees after quoting.
    fn shell_word_count(arg: &str) -> String {
        let line = format!("set -- {}; printf '%s' \"$#\"", escape_argument(arg));
        let output = Command::new("sh").arg("-c").arg(&line).output().unwrap();
        String::from_utf8(output.stdout).unwrap()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(escape_argument("hello world"), "'hello world'");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(escape_argument(""), "''");
        assert_eq!(shell_word_count(""), "1");
    }

    #[test]
    fn test_single_quote() {
        assert_eq!(escape_argument("don't"), "'don'\"'\"'t'");
    }

    #[test]
    fn test_metacharacters_survive_shell() {
        let nasty = "a'b\"c $HOME `id` $(whoami) ; rm -rf / | cat & \\ \n next line";
        assert_eq!(shell_round_trip(nasty), nasty);
        assert_eq!(shell_word_count(nasty), "1");
    }

    #[test]
    fn test_only_quotes() {
        let quotes = "''''";
        assert_eq!(shell_round_trip(quotes), quotes);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_quoted_argument_is_one_literal_word(
            arg in "[a-zA-Z0-9 '\"$`\\\\\n\t;|&<>(){}*?!~#%-]{1,40}"
        ) {
            prop_assert_eq!(shell_round_trip(&arg), arg.clone());
            prop_assert_eq!(shell_word_count(&arg), "1");
        }
    }
}
