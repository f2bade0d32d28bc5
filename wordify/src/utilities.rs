use std::io::{self, Write};

pub fn input(prompt: &str) -> io::Result<String> {
    let mut line = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Asks a yes/no question, falling back to `default` when the answer is not
/// recognized.
pub fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    let mut answer = input(prompt)?;
    answer.make_ascii_lowercase();
    Ok(match answer.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => true,
        "n" | "no" | "nope" | "false" | "off" => false,
        _ => default,
    })
}
