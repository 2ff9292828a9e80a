use crate::{
    cli::{Args, Showcase},
    config::Settings,
    error::Result,
    facade::Prompts,
    form::{Answer, Answers},
    request::{
        options_from_labels, ConfirmRequest, MultiSearchRequest, MultiSelectRequest,
        Options, PasswordRequest, PauseRequest, ProgressRequest, SearchRequest, SelectRequest,
        SuggestRequest, TextRequest, TextareaRequest,
    },
    validation::matches,
};
use log::debug;
use std::thread;
use std::time::Duration;

const LANGUAGES: &[&str] = &[
    "C", "C++", "Elixir", "Go", "Haskell", "Java", "JavaScript", "Kotlin", "OCaml", "Python",
    "Ruby", "Rust", "Scala", "Swift", "TypeScript", "Zig",
];

fn languages(query: &str) -> Options {
    let query = query.to_lowercase();
    options_from_labels(
        LANGUAGES.iter().filter(|language| language.to_lowercase().contains(&query)).copied(),
    )
}

/// Walks through the selected prompt groups and prints the answers as JSON.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Settings file first, then `PROMPTER_*` variables, then flags.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.args.config {
            Some(path) => {
                let mut settings = Settings::load(path)?;
                settings.apply_vars(|name| std::env::var(name).ok());
                settings
            }
            None => Settings::from_env(),
        };

        if let Some(theme) = &self.args.theme {
            settings.theme = theme.clone();
        }
        settings.theme_files.extend(self.args.theme_files.iter().cloned());
        settings.strict_themes |= self.args.strict_themes;
        if self.args.non_interactive {
            settings.interactive = Some(false);
        }
        debug!("Resolved settings: {settings:?}");
        Ok(settings)
    }

    pub fn run(self) -> Result<()> {
        let settings = self.settings()?;
        let mut prompts = Prompts::from_settings(&settings)?;
        let mut answers = Answers::new();

        prompts.intro(&format!("prompter demo ({} theme)", prompts.theme()))?;
        let showcase = self.args.showcase;
        if matches!(showcase, Showcase::All | Showcase::Input) {
            self.input(&mut prompts, &mut answers)?;
        }
        if matches!(showcase, Showcase::All | Showcase::Lists) {
            self.lists(&mut prompts, &mut answers)?;
        }
        if matches!(showcase, Showcase::All | Showcase::Output) {
            self.output(&mut prompts)?;
        }
        if matches!(showcase, Showcase::All | Showcase::Form) {
            self.form(&mut prompts, &mut answers)?;
        }
        prompts.outro("All done.")?;

        println!("{}", serde_json::to_string_pretty(&answers)?);
        Ok(())
    }

    fn input(&self, prompts: &mut Prompts, answers: &mut Answers) -> Result<()> {
        let name = prompts.text(
            TextRequest::new("What is your name?")
                .placeholder("E.g. Ada Lovelace")
                .default_value("Ada")
                .required(true)
                .transform(|value| value.trim().to_string()),
        )?;
        answers.insert("name".into(), Answer::Text(name));

        let bio = prompts.textarea(
            TextareaRequest::new("Tell us about yourself")
                .hint("Press Ctrl-D to submit.")
                .rows(3),
        )?;
        answers.insert("bio".into(), Answer::Text(bio));

        let password = prompts.password(
            PasswordRequest::new("Choose a password")
                .hint("Leave empty to skip.")
                .validate(|value: &String| {
                    let short = !value.is_empty() && value.chars().count() < 8;
                    short.then(|| "Use at least 8 characters.".to_string())
                }),
        )?;
        answers.insert("password_length".into(), Answer::Text(password.chars().count().to_string()));

        let agreed = prompts.confirm(ConfirmRequest::new("Do you accept the terms?"))?;
        answers.insert("terms".into(), Answer::Bool(agreed));
        Ok(())
    }

    fn lists(&self, prompts: &mut Prompts, answers: &mut Answers) -> Result<()> {
        let role = prompts.select(
            SelectRequest::new(
                "What is your role?",
                [("dev", "Developer"), ("ops", "Operations"), ("pm", "Product"), ("qa", "QA")],
            )
            .default_value("dev"),
        )?;
        answers.insert("role".into(), Answer::Key(role));

        let tools = prompts.multiselect(
            MultiSelectRequest::new("Which tools do you use?", [(1, "Git"), (2, "Docker"), (3, "Make")])
                .default_value([1]),
        )?;
        answers.insert("tools".into(), Answer::Keys(tools));

        let editor = prompts.suggest(
            SuggestRequest::new("Favourite editor?")
                .options(["Emacs", "Helix", "Neovim", "VS Code", "Zed"])
                .placeholder("Start typing"),
        )?;
        answers.insert("editor".into(), Answer::Text(editor));

        // A search has no default to fall back on.
        if prompts.is_interactive() {
            let language = prompts.search(
                SearchRequest::new("Main language?", languages).placeholder("Search languages"),
            )?;
            answers.insert("language".into(), Answer::Key(language));
        }

        let others = prompts.multisearch(MultiSearchRequest::new("Other languages?", languages))?;
        answers.insert("other_languages".into(), Answer::Keys(others));
        Ok(())
    }

    fn output(&self, prompts: &mut Prompts) -> Result<()> {
        prompts.info("Output prompts never wait for input.")?;
        prompts.table(
            ["Kind", "Returns"],
            [["text", "String"], ["select", "OptionKey"], ["multiselect", "Vec<OptionKey>"]],
        )?;

        let checksum = prompts.spin("Crunching numbers", || {
            thread::sleep(Duration::from_millis(600));
            (1..=100u32).sum::<u32>()
        })?;
        prompts.note(&format!("Checksum: {checksum}"))?;

        let sizes = prompts
            .progress_map(
                ProgressRequest::new("Copying files"),
                ["Cargo.toml", "README.md", "src/lib.rs"],
                |file, progress| {
                    thread::sleep(Duration::from_millis(200));
                    progress.set_hint(file).map(|_| file.len())
                },
            )?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        debug!("Copied {} bytes of names", sizes.iter().sum::<usize>());

        prompts.warning("Warnings stand out.")?;
        prompts.pause(PauseRequest::default())?;
        Ok(())
    }

    fn form(&self, prompts: &mut Prompts, answers: &mut Answers) -> Result<()> {
        let email = matches(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "Enter a valid email address.")?;
        let signup = prompts
            .form()
            .note("Sign up")
            .text(
                "email",
                TextRequest::new("Email").default_value("ada@example.com").validator(email),
            )
            .select("plan", SelectRequest::new("Plan", [("free", "Free"), ("pro", "Pro")]))
            .add("summary", |prompts, answers| {
                let email = answers.get("email").and_then(Answer::as_str).unwrap_or_default();
                prompts.note(&format!("Welcome, {email}!"))?;
                Ok(Answer::None)
            })
            .submit(prompts)?;
        answers.extend(signup);
        Ok(())
    }
}

pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
