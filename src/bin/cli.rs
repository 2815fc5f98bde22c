use chrono::NaiveDate;
use scheme_tool::{
    Scheme, SchemeSettings, load_topics_from_csv, load_topics_from_json, render_dataframe,
    render_preview, save_rows_to_csv,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show generated rows as a table\n  preview                            Show the scheme as a document preview\n  generate                           Allocate topics across the term\n  weeks <n>                          Set total weeks\n  lessons <n>                        Set lessons per week\n  break add <week> <title...>        Add or retitle a break week\n  break remove <week>                Remove a break week\n  break clear                        Remove every break week\n  config show                        Display term configuration\n  config load <toml_path>            Load settings from a TOML file\n  meta show                          Show title block\n  meta subject <text...>             Set subject\n  meta term <text...>                Set term\n  meta school <text...>              Set school\n  meta start <YYYY-MM-DD>            Set the Monday of week 1\n  topics load <json|csv> <path>      Load the ordered topic list\n  topics show                        List loaded topics\n  export csv <path>                  Write generated rows to CSV\n  quit|exit                          Exit"
    );
}

fn print_config(scheme: &Scheme) {
    let config = scheme.config();
    let breaks = config
        .breaks
        .iter()
        .map(|b| format!("{} ({})", b.week, b.title))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Total weeks        : {}", config.total_weeks);
    println!("Lessons per week   : {}", config.lessons_per_week);
    println!("Break weeks        : {}", breaks);
    println!("Teaching slots     : {}", config.teaching_slots());
}

fn print_metadata(scheme: &Scheme) {
    let metadata = scheme.metadata();
    println!("Subject            : {}", metadata.subject);
    println!("Term               : {}", metadata.term);
    println!("School             : {}", metadata.school);
    match metadata.term_start {
        Some(date) => println!("Term start         : {}", date),
        None => println!("Term start         : (not set)"),
    }
}

fn print_topics(scheme: &Scheme) {
    if scheme.topics().is_empty() {
        println!("No topics loaded.");
        return;
    }
    for (idx, topic) in scheme.topics().iter().enumerate() {
        println!("{:>4}. {} / {}", idx + 1, topic.topic, topic.sub_topic);
    }
}

fn generate(scheme: &mut Scheme) {
    match scheme.generate() {
        Ok(summary) => {
            println!("Generated ({})", summary.to_cli_summary());
            if let Some(allocation) = scheme.allocation() {
                for warning in &allocation.warnings {
                    println!("Warning: {}", warning);
                }
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn rest_of_line<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.parse::<u32>().ok())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut scheme = Scheme::new();

    println!("Scheme Tool (CLI) - type 'help' for commands\n");
    print_config(&scheme);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => match scheme.to_dataframe() {
                Ok(df) => println!("{}", render_dataframe(&df)),
                Err(e) => println!("Error building table: {}", e),
            },
            "preview" => {
                println!("{}", render_preview(scheme.metadata(), scheme.rows()));
            }
            "generate" => generate(&mut scheme),
            "weeks" | "lessons" => {
                let Some(value) = parse_count(parts.next()) else {
                    println!("Usage: {} <n>", cmd);
                    continue;
                };
                let result = scheme.update_config(|config| {
                    if cmd == "weeks" {
                        config.total_weeks = value;
                    } else {
                        config.lessons_per_week = value;
                    }
                });
                match result {
                    Ok(()) => {
                        println!("{} set to {}.", cmd, value);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "break" => match parts.next() {
                Some("add") => {
                    let week = parse_count(parts.next());
                    let title = rest_of_line(parts);
                    match week {
                        Some(week) if week > 0 && !title.is_empty() => {
                            match scheme.update_config(|config| config.set_break(week, title)) {
                                Ok(()) => println!("Break set for week {}.", week),
                                Err(e) => println!("Error: {}", e),
                            }
                        }
                        _ => println!("Usage: break add <week> <title...>"),
                    }
                }
                Some("remove") => match parse_count(parts.next()) {
                    Some(week) => {
                        let mut removed = false;
                        let result = scheme.update_config(|config| {
                            removed = config.remove_break(week);
                        });
                        match result {
                            Ok(()) if removed => println!("Removed break for week {}.", week),
                            Ok(()) => println!("No break for week {}.", week),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    None => println!("Usage: break remove <week>"),
                },
                Some("clear") => match scheme.update_config(|config| config.breaks.clear()) {
                    Ok(()) => println!("Cleared break weeks."),
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: break <add|remove|clear> ..."),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_config(&scheme),
                (Some("load"), Some(path)) => match SchemeSettings::load(path) {
                    Ok(settings) => {
                        let topics = scheme.topics().to_vec();
                        scheme = Scheme::from_settings(settings);
                        scheme.set_topics(topics);
                        println!("Settings loaded from {}.", path);
                        print_config(&scheme);
                    }
                    Err(e) => println!("Error loading settings: {}", e),
                },
                _ => println!("Usage: config <show|load <toml_path>>"),
            },
            "meta" => {
                let field = parts.next();
                let mut metadata = scheme.metadata().clone();
                match field {
                    Some("show") => {
                        print_metadata(&scheme);
                        continue;
                    }
                    Some("subject") => metadata.subject = rest_of_line(parts),
                    Some("term") => metadata.term = rest_of_line(parts),
                    Some("school") => metadata.school = rest_of_line(parts),
                    Some("start") => match parts
                        .next()
                        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                    {
                        Some(Ok(date)) => metadata.term_start = Some(date),
                        _ => {
                            println!("Invalid date (YYYY-MM-DD)");
                            continue;
                        }
                    },
                    _ => {
                        println!("Usage: meta <show|subject|term|school|start> [value]");
                        continue;
                    }
                }
                scheme.set_metadata(metadata);
                println!("Metadata updated.");
            }
            "topics" => match (parts.next(), parts.next(), parts.next()) {
                (Some("show"), _, _) => print_topics(&scheme),
                (Some("load"), Some(format), Some(path)) => {
                    let loaded = match format {
                        "json" => load_topics_from_json(path),
                        "csv" => load_topics_from_csv(path),
                        #[cfg(feature = "remote")]
                        "url" => scheme_tool::TopicSource::load_topics(
                            &scheme_tool::HttpTopicSource::new(path),
                        ),
                        _ => {
                            println!("Unknown format '{}'. Use json or csv.", format);
                            continue;
                        }
                    };
                    match loaded {
                        Ok(topics) => {
                            let count = topics.len();
                            scheme.set_topics(topics);
                            println!("Loaded {} topics from {}.", count, path);
                        }
                        Err(e) => println!("Error loading topics: {}", e),
                    }
                }
                _ => println!("Usage: topics <show|load <json|csv> <path>>"),
            },
            "export" => match (parts.next(), parts.next()) {
                (Some("csv"), Some(path)) => {
                    if scheme.allocation().is_none() {
                        generate(&mut scheme);
                    }
                    match save_rows_to_csv(path, scheme.rows()) {
                        Ok(()) => println!("Scheme exported to {}.", path),
                        Err(e) => println!("Error exporting scheme: {}", e),
                    }
                }
                _ => println!("Usage: export csv <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
