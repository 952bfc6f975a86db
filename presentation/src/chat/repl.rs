//! REPL (Read-Eval-Print Loop) acting as the chat widget

use super::command::ReplCommand;
use super::input::{ChatEditor, new_editor, read_masked};
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use deskchat_application::{
    AssistantGateway, AuthError, AuthenticationController, Elevation, IdentityGateway,
    IgnoreReason, LoginAttempt, OpenSessionInput, SendOutcome, SessionEnv, SessionManager,
};
use deskchat_domain::{AuthMode, Channel, Notice, PersonalData, PersonalDataKind};
use rustyline::Result as RlResult;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing::debug;

/// Interactive chat REPL
pub struct WidgetRepl<A: AssistantGateway + 'static, I: IdentityGateway + 'static> {
    assistant: Arc<A>,
    auth: AuthenticationController<I>,
    channel: Channel,
    env: SessionEnv,
    config: ReplConfig,
}

impl<A: AssistantGateway + 'static, I: IdentityGateway + 'static> WidgetRepl<A, I> {
    pub fn new(assistant: Arc<A>, identity: Arc<I>, channel: Channel) -> Self {
        Self {
            assistant,
            auth: AuthenticationController::new(identity),
            channel,
            env: SessionEnv::default(),
            config: ReplConfig::default(),
        }
    }

    /// Set observer, logger and behavior shared by the session
    pub fn with_env(mut self, env: SessionEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = new_editor()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        let mut login: Option<Elevation> = None;
        let mut session = self.open_session(None);

        let prompt = format!("{}> ", self.channel);
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(&line) {
                        let exit = self
                            .handle_command(&mut rl, &mut session, &mut login, command)
                            .await;
                        if exit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line.as_str());
                    self.send(&session, &line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        session.close();

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let title = match self.channel {
            Channel::Web => "Student Services Chat",
            Channel::WhatsApp => "Student Services Chat (WhatsApp)",
        };
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│ {:^43} │", title);
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type a question, or /help for commands.");
        println!();
    }

    /// Open a session, carrying over an earlier login if there is one.
    fn open_session(&self, login: Option<&Elevation>) -> SessionManager<A> {
        let mut input = OpenSessionInput::new(self.channel);
        if let Some(elevation) = login {
            input = input.with_identity(elevation.clone());
        }
        let session = SessionManager::open(self.assistant.clone(), input, self.env.clone());
        self.print_quick_replies(&session);
        session
    }

    fn print_quick_replies(&self, session: &SessionManager<A>) {
        let replies = session.quick_replies();
        if !replies.is_empty() {
            println!("{}\n", ConsoleFormatter::format_quick_replies(&replies));
        }
    }

    fn print_notice(notice: &Notice) {
        println!("{}", ConsoleFormatter::format_notice(notice));
    }

    async fn send(&self, session: &SessionManager<A>, text: &str) {
        match session.send(text).await {
            SendOutcome::Replied { user, .. } => {
                // The reply is on screen by now
                let transition = session.mark_read(&user);
                debug!("Read receipt: {:?}", transition);
            }
            SendOutcome::Failed { .. } => {}
            SendOutcome::Ignored(IgnoreReason::Empty) => {}
            SendOutcome::Ignored(reason) => debug!("Send ignored: {:?}", reason),
            SendOutcome::Abandoned { .. } => debug!("Reply arrived after close"),
        }
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(
        &self,
        rl: &mut ChatEditor,
        session: &mut SessionManager<A>,
        login: &mut Option<Elevation>,
        command: ReplCommand,
    ) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help());
                println!();
            }
            ReplCommand::Login | ReplCommand::Otp => {
                let attempt = if command == ReplCommand::Login {
                    LoginAttempt::password(&self.auth)
                } else {
                    LoginAttempt::one_time_code(&self.auth)
                };
                if let Some(elevation) = self.log_in(rl, session, attempt).await {
                    *login = Some(elevation);
                }
            }
            ReplCommand::Logout => {
                if session.revoke() {
                    *login = None;
                } else {
                    println!("You are not logged in.");
                }
            }
            ReplCommand::New => {
                session.close();
                println!();
                *session = self.open_session(login.as_ref());
            }
            ReplCommand::Quick(None) => {
                let replies = session.quick_replies();
                if replies.is_empty() {
                    println!("Quick replies are only offered before your first message.");
                } else {
                    println!("{}", ConsoleFormatter::format_quick_replies(&replies));
                }
            }
            ReplCommand::Quick(Some(n)) => {
                let outcome = session.send_quick_reply(n - 1).await;
                if outcome == SendOutcome::Ignored(IgnoreReason::NotOffered) {
                    println!("No quick reply {} on offer. Type /quick to list them.", n);
                }
            }
            ReplCommand::History => match session.history().await {
                Ok(entries) => println!("{}", ConsoleFormatter::format_history(&entries)),
                Err(_) => Self::print_notice(&Notice::Error(
                    "Could not load the stored transcript. Please try again.".to_string(),
                )),
            },
            ReplCommand::PersonalData(kind) => self.show_personal_data(session, kind).await,
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn ensure_anonymous(session: &SessionManager<A>) -> bool {
        match session.identity().display_name() {
            Some(name) => {
                println!("Already logged in as {}. Use /logout first.", name.bold());
                false
            }
            None => true,
        }
    }

    /// Run one login dialog. Typing `/otp` or `/password` switches tabs and
    /// keeps the student id.
    async fn log_in(
        &self,
        rl: &mut ChatEditor,
        session: &SessionManager<A>,
        mut attempt: LoginAttempt<'_, I>,
    ) -> Option<Elevation> {
        if !Self::ensure_anonymous(session) {
            return None;
        }
        let subject_id = prompt(rl, "Student ID: ")?;

        loop {
            let step = match attempt.mode() {
                AuthMode::Password => {
                    let password = prompt_secret(rl, "Password (/otp = use a code): ")?;
                    if password.trim() == "/otp" {
                        Self::report(attempt.use_one_time_code());
                        continue;
                    }
                    attempt.submit_password(&subject_id, &password).await.map(Some)
                }
                AuthMode::OtpRequest => {
                    let phone = prompt(rl, "Phone number (/password = use a password): ")?;
                    if phone.trim() == "/password" {
                        Self::report(attempt.use_password());
                        continue;
                    }
                    attempt.request_code(&subject_id, &phone).await.map(|_| None)
                }
                AuthMode::OtpVerify => {
                    let code = prompt(rl, "Code (r = new code, empty = cancel): ")?;
                    let code = code.trim();
                    if code.is_empty() {
                        println!("Login cancelled.");
                        return None;
                    }
                    if code.eq_ignore_ascii_case("r") && attempt.flow().can_resend() {
                        Self::report(attempt.request_new_code());
                        continue;
                    }
                    attempt.verify_code(code).await.map(Some)
                }
            };

            if let Some(notice) = attempt.flow().notice() {
                Self::print_notice(notice);
            }
            match step {
                Ok(Some(elevation)) => {
                    session.elevate(elevation.clone());
                    return Some(elevation);
                }
                Ok(None) => {}
                // Wrong code: stay on the verify step
                Err(_) if attempt.mode() == AuthMode::OtpVerify => {}
                Err(_) => return None,
            }
        }
    }

    fn report<T>(result: Result<T, AuthError>) {
        if let Err(e) = result {
            Self::print_notice(&Notice::Error(e.user_message()));
        }
    }

    async fn show_personal_data(&self, session: &SessionManager<A>, kind: PersonalDataKind) {
        match self.auth.personal_data(&session.identity(), kind).await {
            Ok(PersonalData::Found(text)) => {
                println!("{}\n", ConsoleFormatter::format_personal_data(kind, &text));
            }
            Ok(PersonalData::Denied(message)) => Self::print_notice(&Notice::Error(message)),
            Err(e) => Self::print_notice(&Notice::Error(e.user_message())),
        }
    }
}

/// Read one answer; `None` on Ctrl-C or end of input.
fn prompt(rl: &mut ChatEditor, label: &str) -> Option<String> {
    answer(rl.readline(label))
}

/// Like [`prompt`], with the typed characters masked.
fn prompt_secret(rl: &mut ChatEditor, label: &str) -> Option<String> {
    answer(read_masked(rl, label))
}

fn answer(read: RlResult<String>) -> Option<String> {
    match read {
        Ok(answer) => Some(answer),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Login cancelled.");
            None
        }
        Err(err) => {
            eprintln!("Error: {:?}", err);
            None
        }
    }
}
