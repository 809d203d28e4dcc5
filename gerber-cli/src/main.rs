use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gerber::text::{parse_dfa, parse_nfa, parse_recognition};
use gerber::minimize::quotient;
use gerber::{refine, subset_construction, Dfa, Recognizer, Run};
use regex_parser::{compile, Parsed};

/// Gerber - regex to minimal DFA, one stage at a time
#[derive(Parser, Debug)]
#[command(name = "gerber")]
#[command(about = "Regex -> NFA -> DFA -> minimal DFA -> recognition", long_about = None)]
struct Args {
    /// Print stage summaries to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read input from FILE instead of stdin
    #[arg(short, long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a regex with explicit concatenation, then in postfix form
    Postfix {
        /// The regex, read from the input if omitted
        regex: Option<String>,
    },
    /// Print the Thompson NFA of a regex
    Nfa {
        /// The regex, read from the input if omitted
        regex: Option<String>,
    },
    /// Convert an NFA block to a DFA
    Dfa {
        /// Minimize the result as well
        #[arg(short, long)]
        minimize: bool,
    },
    /// Minimize a DFA block
    Minimize,
    /// Run the candidates of a recognition block
    Recognize,
    /// Compile a regex and run strings through it
    Match {
        /// The regex
        regex: String,
        /// Candidates, one per input line if omitted
        strings: Vec<String>,
        /// Run the minimal DFA
        #[arg(short, long)]
        minimize: bool,
        /// Print only `pass` or `error` per candidate
        #[arg(short, long)]
        quiet: bool,
    },
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// First whitespace separated token, the regex when it comes from the input.
fn first_token(input: &str) -> String {
    input.split_whitespace().next().unwrap_or_default().to_string()
}

/// The regex argument, or the first token of the input.
fn regex_or_input(regex: Option<String>, input: Option<&Path>) -> Result<String> {
    match regex {
        Some(regex) => Ok(regex),
        None => Ok(first_token(&read_input(input)?)),
    }
}

/// One candidate per input line.
fn input_candidates(input: &str) -> Vec<String> {
    input.lines().map(str::to_string).collect()
}

fn report_dfa(verbose: bool, stage: &str, dfa: &Dfa) {
    if verbose {
        eprintln!("{stage}: {} states, alphabet {:?}", dfa.len(), dfa.alphabet());
    }
}

fn minimize_reported(verbose: bool, dfa: &Dfa) -> Dfa {
    let partition = refine(dfa);
    if verbose {
        eprintln!(
            "minimize: {} groups after {} rounds {:?}",
            partition.groups.len(),
            partition.rounds(),
            partition.history
        );
    }
    let minimal = quotient(dfa, &partition);
    report_dfa(verbose, "minimal", &minimal);
    minimal
}

/// The echo block, or only the verdict when quiet.
fn render_run(run: &Run, quiet: bool) -> String {
    if quiet { run.verdict.to_string() } else { run.to_string() }
}

fn print_run(run: &Run, quiet: bool) {
    println!("{}", render_run(run, quiet));
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbose = args.verbose;
    let input = args.input.as_deref();

    match args.command {
        Command::Postfix { regex } => {
            let regex = regex_or_input(regex, input)?;
            println!("{}", Parsed::new(&regex));
        }
        Command::Nfa { regex } => {
            let regex = regex_or_input(regex, input)?;
            let nfa = compile(&regex).with_context(|| format!("building an NFA for {regex:?}"))?;
            if verbose {
                eprintln!("nfa: {} states, alphabet {:?}", nfa.len(), nfa.alphabet());
            }
            print!("{nfa}");
        }
        Command::Dfa { minimize } => {
            let nfa = parse_nfa(&read_input(input)?);
            if verbose {
                eprintln!("nfa: {} states read", nfa.len());
            }
            let dfa = subset_construction(&nfa)?;
            report_dfa(verbose, "dfa", &dfa);
            if minimize {
                print!("{}", minimize_reported(verbose, &dfa));
            } else {
                print!("{dfa}");
            }
        }
        Command::Minimize => {
            let dfa = parse_dfa(&read_input(input)?);
            report_dfa(verbose, "dfa", &dfa);
            print!("{}", minimize_reported(verbose, &dfa));
        }
        Command::Recognize => {
            let block = parse_recognition(&read_input(input)?);
            report_dfa(verbose, "dfa", &block.dfa);
            let recognizer = Recognizer::new(&block.dfa);
            for candidate in &block.candidates {
                print_run(&recognizer.run(candidate), false);
            }
        }
        Command::Match {
            regex,
            strings,
            minimize,
            quiet,
        } => {
            let nfa = compile(&regex).with_context(|| format!("building an NFA for {regex:?}"))?;
            if verbose {
                eprintln!("nfa: {} states", nfa.len());
            }
            let mut dfa = subset_construction(&nfa)?;
            report_dfa(verbose, "dfa", &dfa);
            if minimize {
                dfa = minimize_reported(verbose, &dfa);
            }

            let candidates = if strings.is_empty() {
                input_candidates(&read_input(input)?)
            } else {
                strings
            };

            let recognizer = Recognizer::new(&dfa);
            let mut passed = 0;
            for candidate in &candidates {
                let run = recognizer.run(candidate);
                passed += usize::from(run.passed());
                print_run(&run, quiet);
            }
            if verbose {
                eprintln!("match: {passed}/{} passed", candidates.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gerber::text::parse_dfa;
    use gerber::{minimize, Verdict};
    use regex_parser::create_regex_dfa;

    #[test]
    fn test_regex_is_first_token() {
        assert_eq!(first_token("  (a|b)*c  trailing\nnext line\n"), "(a|b)*c");
        assert_eq!(first_token("\n"), "");
        assert_eq!(regex_or_input(Some("ab".into()), None).unwrap(), "ab");
    }

    #[test]
    fn test_candidates_per_line() {
        assert_eq!(input_candidates("ab\n\nba\n"), ["ab", "", "ba"]);
        assert!(input_candidates("").is_empty());
    }

    #[test]
    fn test_quiet_prints_only_verdict() {
        let dfa = create_regex_dfa("ab").unwrap();
        let recognizer = Recognizer::new(&dfa);

        let run = recognizer.run("ab");
        assert_eq!(render_run(&run, false), "a\nb\npass");
        assert_eq!(render_run(&run, true), "pass");

        let run = recognizer.run("a");
        assert_eq!(run.verdict, Verdict::Error);
        assert_eq!(render_run(&run, true), "error");
    }

    #[test]
    fn test_reported_minimization_matches_library() {
        let dfa = parse_dfa("X X-a->0 X-b->1\n0 0-a->Y 0-b->Y\n1 1-a->Y 1-b->Y\n\n");
        for verbose in [false, true] {
            assert_eq!(minimize_reported(verbose, &dfa).to_string(), minimize(&dfa).to_string());
        }
    }
}
