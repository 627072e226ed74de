use nu_ansi_term::Color::{Cyan, Green, Red, Yellow};

/// Print info on console. Console messages go to stderr, keeping stdout for rendered output.
pub fn info(message: &str) {
    eprintln!("{}", Cyan.bold().italic().paint(message));
}

/// Print a rendered object's kind and name on console.
pub fn object(kind: &str, name: &str) {
    eprintln!("{} {}", Green.bold().paint(kind), name);
}

/// Print a template which was not rendered on console, with the renderer's diagnostic.
pub fn skipped(message: &str, diagnostic: &str) {
    eprintln!(
        "{} \n {} ",
        Yellow.bold().italic().paint(message),
        diagnostic.trim_end()
    );
}

/// Print an error on console.
pub fn error(message: &str, data: &str) {
    eprintln!(
        "{} \n {} ",
        Cyan.bold().italic().paint(message),
        Red.bold().italic().paint(data)
    );
}
