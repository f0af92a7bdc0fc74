//! Interactive line-oriented shell over the auth state machine.
//!
//! The shell restores the saved session on start, then shows one screen at a
//! time. Which screens are reachable is decided by
//! [`latch_auth::available_screens`]; the shell only asks for a screen and
//! falls back to the initial one when the session state forbids it.

use std::io::{self, Write};

use latch_auth::routing::resolve;
use latch_auth::{
    AuthController, AuthOutcome, INVALID_CREDENTIAL, LoginForm, Screen, SignupForm,
    ValidationErrors, initial_screen,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::styled_output::{MessageType, format_styled};

enum Flow {
    Continue,
    Quit,
}

fn prompt_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "home> ",
        Screen::Login => "login> ",
        Screen::Signup => "signup> ",
    }
}

fn commands(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Commands: logout, help, quit",
        Screen::Login => "Commands: login, signup, help, quit",
        Screen::Signup => "Commands: create, back, help, quit",
    }
}

pub struct Shell<R, W> {
    controller: AuthController,
    input: R,
    output: W,
    screen: Screen,
    colors: bool,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(controller: AuthController, input: R, output: W, colors: bool) -> Self {
        let screen = initial_screen(&controller.snapshot());
        Self {
            controller,
            input,
            output,
            screen,
            colors,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `quit` or end of input, then wait for pending persistence.
    ///
    /// Queued effects are flushed even when writing to the output fails.
    pub async fn run(&mut self) -> io::Result<()> {
        let result = self.session().await;
        self.controller.flush().await;
        if let Err(e) = &result {
            warn!(error = %e, "Shell output failed, stopping");
        }
        result?;

        writeln!(self.output)?;
        self.output.flush()
    }

    async fn session(&mut self) -> io::Result<()> {
        if !self.controller.is_restored()
            && let Some(account) = self.controller.bootstrap().await
        {
            self.notice(
                MessageType::Info,
                &format!("Welcome back, {}.", account.name),
            )?;
        }
        self.screen = resolve(self.screen, &self.controller.snapshot());
        self.render()?;

        loop {
            let Some(line) = self.read_line(prompt_label(self.screen)).await? else {
                return Ok(());
            };
            let before = self.screen;
            if let Flow::Quit = self.handle(line.trim()).await? {
                return Ok(());
            }
            self.screen = resolve(self.screen, &self.controller.snapshot());
            if self.screen != before {
                self.render()?;
            }
        }
    }

    async fn handle(&mut self, command: &str) -> io::Result<Flow> {
        let command = command.to_lowercase();
        match command.as_str() {
            "" => {}
            "help" | "?" => self.render()?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => match (self.screen, other) {
                (Screen::Login, "login" | "signin") => return self.login().await,
                (Screen::Login, "signup" | "register") => self.screen = Screen::Signup,
                (Screen::Signup, "create" | "submit") => return self.signup().await,
                (Screen::Signup, "back" | "login") => self.screen = Screen::Login,
                (Screen::Home, "logout" | "signout") => {
                    self.controller.logout();
                    self.notice(MessageType::Dim, "Signed out.")?;
                }
                _ => self.notice(
                    MessageType::Error,
                    &format!("Unknown command '{other}'. Type 'help' for commands."),
                )?,
            },
        }
        Ok(Flow::Continue)
    }

    async fn login(&mut self) -> io::Result<Flow> {
        let Some(email) = self.read_line("Email: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.read_line("Password: ").await? else {
            return Ok(Flow::Quit);
        };

        let action = match (LoginForm { email, password }).validate() {
            Ok(action) => action,
            Err(errors) => {
                self.report(&errors)?;
                return Ok(Flow::Continue);
            }
        };

        match self.controller.dispatch(action) {
            AuthOutcome::Authenticated(account) => self.notice(
                MessageType::Success,
                &format!("Signed in as {}.", account.email),
            )?,
            AuthOutcome::InvalidCredential => {
                let message = self
                    .controller
                    .snapshot()
                    .last_error
                    .unwrap_or_else(|| INVALID_CREDENTIAL.to_string());
                self.notice(MessageType::Error, &message)?;
            }
            other => debug!(outcome = ?other, "Login left the session unchanged"),
        }
        Ok(Flow::Continue)
    }

    async fn signup(&mut self) -> io::Result<Flow> {
        let Some(name) = self.read_line("Name: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.read_line("Email: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.read_line("Password: ").await? else {
            return Ok(Flow::Quit);
        };

        let form = SignupForm {
            name,
            email,
            password,
        };
        match form.validate() {
            Ok(action) => {
                self.controller.dispatch(action);
                self.notice(
                    MessageType::Success,
                    &format!("Account created for {}. Sign in to continue.", form.email),
                )?;
                self.screen = Screen::Login;
            }
            Err(errors) => self.report(&errors)?,
        }
        Ok(Flow::Continue)
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "== {} ==", self.screen.title())?;
        if self.screen == Screen::Home
            && let Some(account) = self.controller.snapshot().current_session
        {
            writeln!(self.output, "Username: {}", account.name)?;
            writeln!(self.output, "Email: {}", account.email)?;
        }
        let hint = format_styled(MessageType::Dim, commands(self.screen), self.colors);
        writeln!(self.output, "{hint}")
    }

    fn report(&mut self, errors: &ValidationErrors) -> io::Result<()> {
        for error in errors.iter() {
            self.notice(
                MessageType::Error,
                &format!("{}: {}", error.field, error.message),
            )?;
        }
        Ok(())
    }

    fn notice(&mut self, msg_type: MessageType, message: &str) -> io::Result<()> {
        let line = format_styled(msg_type, message, self.colors);
        writeln!(self.output, "{line}")
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf).await? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
