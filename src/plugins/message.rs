use rand::Rng;

use crate::{common::pick, lang::Strings, Command, Outgoing};

// commands that only answer with a canned or random line
pub fn message_main<R: Rng + ?Sized>(
    command: Command,
    strings: &Strings,
    prompts: &[String],
    rng: &mut R,
) -> Option<Outgoing> {
    let mes = match command {
        Command::Help => strings.help.as_str(),
        Command::Cheer => pick(rng, &strings.cheer)?,
        Command::Congrats => pick(rng, &strings.congrats)?,
        Command::Prompt => pick(rng, prompts)?,
        // hydrate goes to the whole channel
        Command::Hydrate => return Some(Outgoing::Channel(strings.hydrate.to_owned())),
        _ => return None,
    };
    Some(Outgoing::Reply(mes.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn strings() -> Strings {
        Strings::from_json(include_str!("../../lang/en.json")).unwrap()
    }

    #[test]
    fn random_lines_come_from_their_list() {
        let strings = strings();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let Some(Outgoing::Reply(line)) =
                message_main(Command::Cheer, &strings, &[], &mut rng)
            else {
                panic!("cheer should reply");
            };
            assert!(strings.cheer.contains(&line));
        }
    }

    #[test]
    fn hydrate_is_sent_to_channel() {
        let strings = strings();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            message_main(Command::Hydrate, &strings, &[], &mut rng),
            Some(Outgoing::Channel(strings.hydrate.clone()))
        );
    }

    #[test]
    fn prompt_without_prompts_is_silent() {
        let strings = strings();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(message_main(Command::Prompt, &strings, &[], &mut rng).is_none());

        let prompts = vec![String::from("Write a door.")];
        assert_eq!(
            message_main(Command::Prompt, &strings, &prompts, &mut rng),
            Some(Outgoing::Reply(String::from("Write a door.")))
        );
    }

    #[test]
    fn ledger_commands_are_not_handled_here() {
        let strings = strings();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(message_main(Command::Words, &strings, &[], &mut rng).is_none());
    }
}
