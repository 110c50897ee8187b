//! CLI pretty printing for consistent output formatting
//!
//! All human-facing output funnels through here so the report format stays
//! in one place. Logging (progress, diagnostics) goes through `log`; this
//! module is only the final report.

use crate::alphabet::indices_to_text;
use crate::config::Config;
use crate::searchers::SolveOutcome;
use crate::storage::dictionary_words_in;
use colored::Colorize;

/// Print the success report: score, recovered alphabets, cycleword and
/// plaintext, plus the dictionary word report when a dictionary is loaded.
pub fn success_report(outcome: &SolveOutcome, config: &Config, dictionary: &[String]) {
    let plaintext = indices_to_text(&outcome.plaintext);

    println!();
    println!("{}", "Best solution".green().bold());
    println!("Score:        {:.4}", outcome.score);
    println!(
        "Cipher:       {}{}",
        config.cipher,
        if config.variant { " (variant)" } else { "" }
    );
    println!("Period:       {}", outcome.period);
    println!("PT alphabet:  {}", outcome.state.pt_alphabet);
    println!("CT alphabet:  {}", outcome.state.ct_alphabet);
    println!("Cycleword:    {}", indices_to_text(&outcome.state.cycleword));
    println!("Plaintext:    {}", plaintext.bold());

    if !dictionary.is_empty() {
        let found = dictionary_words_in(&plaintext, dictionary);
        println!("Dictionary:   {} word(s) matched", found.len());
        if !found.is_empty() {
            println!("              {}", found.join(" "));
        }
    }
}

/// Header line for one item of a batch run.
pub fn batch_item_header(index: usize, total: usize) {
    println!();
    println!(
        "{}",
        format!("=== ciphertext {}/{} ===", index + 1, total).cyan()
    );
}

/// Printed when the search produced nothing scoreable.
pub fn failed_to_solve() {
    println!("{}", "No solution found within the search constraints.".red());
}

/// A warning the user should see even without -verbose.
pub fn warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
