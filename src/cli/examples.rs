//! Example queries - list them or pick one and search it

use anyhow::Result;

use crate::config::Config;
use crate::search::view::{all_examples, PROMPT_EXAMPLES};
use crate::ui::{ExampleOption, ExamplePicker};

pub fn options() -> Vec<ExampleOption> {
    all_examples()
        .map(|q| ExampleOption::new(q, PROMPT_EXAMPLES.contains(&q)))
        .collect()
}

pub async fn run(config: Config, list: bool, limit: usize) -> Result<()> {
    let options = options();

    if list {
        for option in &options {
            println!("{}", option.query);
        }
        return Ok(());
    }

    match ExamplePicker::new().pick(&options)? {
        Some(option) => super::search::run(config, &option.query, limit, false).await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_mark_prompt_examples() {
        let options = options();
        assert_eq!(options.len(), 7);
        assert_eq!(options.iter().filter(|o| o.featured).count(), 4);
        assert!(!options.last().unwrap().featured);
    }
}
