use std::io::{self, BufRead, Write};

use super::account::{Account, Pin, Rupees};
use super::console::Console;
use super::help;
use super::store::{Store, StoreError};

/// Where the customer currently is in the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    LoggedIn(Pin),
    HelpMode(Pin),
    Exited,
}

/// Owns the account store and the console for the lifetime of the process.
pub struct Session<R, W> {
    store: Store,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: Store, console: Console<R, W>) -> Self {
        Self { store, console }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.console.say("=== Welcome to the Smart ATM Machine ===")?;
        let mut state = State::MainMenu;
        while state != State::Exited {
            let next = self.step(state)?;
            if next != state {
                debug!("{state:?} -> {next:?}");
            }
            state = next;
        }
        Ok(())
    }

    pub fn step(&mut self, state: State) -> io::Result<State> {
        match state {
            State::MainMenu => self.main_menu(),
            State::LoggedIn(pin) => self.user_menu(pin),
            State::HelpMode(pin) => self.help_box(pin),
            State::Exited => Ok(State::Exited),
        }
    }

    fn main_menu(&mut self) -> io::Result<State> {
        self.console.say("Main Menu:")?;
        self.console.say("1. Login")?;
        self.console.say("2. Create Account")?;
        self.console.say("3. Exit")?;
        self.console.prompt("Enter your choice: ")?;

        let choice = match self.console.read_int()? {
            Some(choice) => choice,
            None => return Ok(self.end_of_input()),
        };

        match choice {
            1 => self.login(),
            2 => {
                self.create_account()?;
                Ok(State::MainMenu)
            }
            3 => {
                self.console
                    .say("Thank you for using Smart ATM. Goodbye!")?;
                Ok(State::Exited)
            }
            _ => {
                self.console.say("Invalid choice. Please try again.")?;
                Ok(State::MainMenu)
            }
        }
    }

    fn login(&mut self) -> io::Result<State> {
        self.console.prompt("Enter your 4-digit PIN: ")?;
        let pin = match self.console.read_int()? {
            Some(pin) => Pin::new(pin),
            None => return Ok(self.end_of_input()),
        };

        let verified = self
            .store
            .get(pin)
            .map_or(false, |account| account.verify_pin(pin));
        if !verified {
            warn!("login attempt with unknown PIN {pin}");
            self.console
                .say("Account not found. Please create an account first.")?;
            return Ok(State::MainMenu);
        }

        info!("account {pin} logged in");
        self.console.say("Login successful!")?;
        Ok(State::LoggedIn(pin))
    }

    fn create_account(&mut self) -> io::Result<()> {
        self.console.prompt("Enter a new 4-digit PIN: ")?;
        let pin = match self.console.read_int()? {
            Some(pin) => Pin::new(pin),
            None => return Ok(()),
        };

        if self.store.contains(pin) {
            self.console.say(StoreError::PinTaken(pin).to_string())?;
            return Ok(());
        }

        self.console.prompt("Enter your initial balance: ")?;
        let initial_balance = match self.console.read_amount()? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match self.store.open_account(pin, initial_balance) {
            Ok(()) => self
                .console
                .say(format!("Account created successfully with PIN: {pin}")),
            Err(e) => self.console.say(e.to_string()),
        }
    }

    fn user_menu(&mut self, pin: Pin) -> io::Result<State> {
        self.console.say("--- ATM Main Menu ---")?;
        self.console.say("1. Withdraw Cash")?;
        self.console.say("2. Deposit Cash")?;
        self.console.say("3. Check Balance")?;
        self.console.say("4. View Last Transaction")?;
        self.console.say("5. AI Help Box")?;
        self.console.say("6. Logout")?;
        self.console.prompt("Select an option: ")?;

        let choice = match self.console.read_int()? {
            Some(choice) => choice,
            None => return Ok(self.end_of_input()),
        };

        match choice {
            1 => {
                self.console.prompt("Enter amount to withdraw: ")?;
                let amount = match self.console.read_amount()? {
                    Some(amount) => amount,
                    None => return Ok(self.end_of_input()),
                };
                let message = match self.logged_in_account(pin)?.withdraw(amount) {
                    Ok(_) => format!("Successfully withdrew {}", Rupees(amount)),
                    Err(e) => e.to_string(),
                };
                self.console.say(message)?;
            }
            2 => {
                self.console.prompt("Enter amount to deposit: ")?;
                let amount = match self.console.read_amount()? {
                    Some(amount) => amount,
                    None => return Ok(self.end_of_input()),
                };
                let message = match self.logged_in_account(pin)?.deposit(amount) {
                    Ok(_) => format!("Successfully deposited {}", Rupees(amount)),
                    Err(e) => e.to_string(),
                };
                self.console.say(message)?;
            }
            3 => {
                let balance = self.logged_in_account(pin)?.balance();
                self.console
                    .say(format!("Your current balance: {}", Rupees(balance)))?;
            }
            4 => {
                let last = self.logged_in_account(pin)?.last_transaction().to_string();
                self.console.say(format!("Last Transaction: {last}"))?;
            }
            5 => {
                self.console.say("=== ATM AI Help Box ===")?;
                self.console.say("Ask me anything (type 'exit' to leave):")?;
                self.console.discard_line();
                return Ok(State::HelpMode(pin));
            }
            6 => {
                info!("account {pin} logged out");
                self.console.say("Logged out successfully.")?;
                return Ok(State::MainMenu);
            }
            _ => self.console.say("Invalid selection. Try again.")?,
        }
        Ok(State::LoggedIn(pin))
    }

    fn help_box(&mut self, pin: Pin) -> io::Result<State> {
        self.console.prompt("You: ")?;
        let question = match self.console.read_line()? {
            Some(question) => question,
            None => return Ok(self.end_of_input()),
        };

        // Only the bare word leaves; anything padded goes to the responder.
        if question.eq_ignore_ascii_case("exit") {
            return Ok(State::LoggedIn(pin));
        }
        self.console.say(help::respond(&question))?;
        Ok(State::HelpMode(pin))
    }

    /// Accounts are never removed, so a logged in PIN always resolves.
    fn logged_in_account(&mut self, pin: Pin) -> io::Result<&mut Account> {
        self.store.get_mut(pin).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("logged in account {pin} is missing from the store"),
            )
        })
    }

    fn end_of_input(&self) -> State {
        info!("input closed, ending session");
        State::Exited
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.console.into_output()
    }
}
