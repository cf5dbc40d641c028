//! Typing Demo - replays an editing session through the mask engine
//!
//! Usage: cargo run --example typing -- [COUNTRY]
//! Prints the display string and caret after every simulated key press.

use phone_mask::{
    process_keydown, process_paste, Formatter, Key, KeyEvent, KeyOutcome, MaskResult, MaskTable,
    Selection,
};

/// Print the field with a `|` at the caret
fn show(step: &str, formatter: &Formatter, digits: &str, caret: usize) {
    let display = formatter.format_display(digits);
    let (before, after): (String, String) = {
        let chars: Vec<char> = display.chars().collect();
        let caret = caret.min(chars.len());
        (chars[..caret].iter().collect(), chars[caret..].iter().collect())
    };
    let state = formatter.state(digits);
    println!(
        "{:<22} {} {}|{:<20} complete={}",
        step,
        formatter.calling_code(),
        before,
        after,
        state.is_complete
    );
}

fn main() -> MaskResult<()> {
    let id = std::env::args().nth(1).unwrap_or_else(|| "US".to_string());
    let table = MaskTable::builtin()?;
    let country = table.require(&id)?;
    let formatter = country.formatter()?;

    println!("{} {} ({})", country.flag, country.id, formatter.placeholder());
    println!("========================");

    let mut digits = String::new();
    let mut caret = 0;

    // Type digits one by one until the field is full
    for c in "2015551234567".chars() {
        let event = KeyEvent::simple(Key::Char(c));
        match process_keydown(event, Selection::caret(caret), &digits, &formatter) {
            KeyOutcome::Allow => {
                digits.push(c);
                caret = formatter.caret_position(digits.chars().count());
                show(&format!("type '{c}'"), &formatter, &digits, caret);
            }
            KeyOutcome::Block => show(&format!("type '{c}' (blocked)"), &formatter, &digits, caret),
            _ => {}
        }
    }

    // Backspace twice from the end
    for _ in 0..2 {
        let event = KeyEvent::simple(Key::Backspace);
        if let KeyOutcome::Edit(edit) = process_keydown(event, Selection::caret(caret), &digits, &formatter) {
            caret = edit.caret_position(&formatter);
            digits = edit.new_digits;
            show("backspace", &formatter, &digits, caret);
        }
    }

    // Select everything and paste a formatted number over it
    let all = Selection::new(0, formatter.format_display(&digits).chars().count());
    if let Some(edit) = process_paste("(415) 555-0100", all, &digits, &formatter) {
        caret = edit.caret_position(&formatter);
        digits = edit.new_digits;
        show("paste", &formatter, &digits, caret);
    }

    println!("full number: {}", formatter.phone_number(&digits).full);
    Ok(())
}
