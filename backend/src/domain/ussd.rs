//! USSD session grammar.
//!
//! Gateways post the whole session history as `*`-joined inputs, so a
//! shipper who chose "post shipment", Lilongwe, Blantyre, and 1500 kg arrives
//! as `"1*1*2*1500"`. [`interpret`] replays that history through the menu
//! state machine and validates every input against the state it lands in.

use super::geo::District;
use super::{Error, ErrorCode, PhoneNumber};

/// Longest session text a gateway may send.
pub const USSD_MAX_TEXT_LEN: usize = 182;
/// Heaviest load accepted over USSD, in kilograms.
pub const USSD_MAX_WEIGHT_KG: f64 = 60_000.0;
/// Tracking reference length bounds.
const REFERENCE_LEN: std::ops::RangeInclusive<usize> = 6..=12;
/// Longest accepted session identifier, in characters.
const SESSION_ID_MAX_LEN: usize = 64;

/// Position in the menu tree, carrying answers collected so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UssdMenuState {
    Main,
    PostOrigin,
    PostDestination {
        origin: District,
    },
    PostWeight {
        origin: District,
        destination: District,
    },
    PostConfirm {
        origin: District,
        destination: District,
        weight_kg: f64,
    },
    TrackReference,
    Account,
}

/// Final command produced by a completed menu path.
#[derive(Debug, Clone, PartialEq)]
pub enum UssdCommand {
    PostShipment {
        origin: District,
        destination: District,
        weight_kg: f64,
    },
    TrackShipment {
        reference: String,
    },
    ViewAccount,
    Exit,
    Cancelled,
}

/// Result of replaying a session.
#[derive(Debug, Clone, PartialEq)]
pub enum UssdOutcome {
    /// The session continues; show this menu next.
    Prompt(UssdMenuState),
    /// The session produced a command and ends.
    Command(UssdCommand),
}

fn invalid_input(message: impl Into<String>) -> Error {
    Error::new(ErrorCode::InvalidUssdInput, message)
}

fn district_choice(input: &str) -> Result<District, Error> {
    input
        .parse::<usize>()
        .ok()
        .and_then(District::from_menu_index)
        .ok_or_else(|| {
            invalid_input(format!(
                "choose a district between 1 and {}",
                District::ALL.len()
            ))
        })
}

/// Positive decimal with at most two fractional digits, capped at
/// [`USSD_MAX_WEIGHT_KG`].
fn parse_weight(input: &str) -> Result<f64, Error> {
    let malformed = || invalid_input("weight must be a number of kilograms");
    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2 {
        return Err(malformed());
    }
    if input.ends_with('.') {
        return Err(malformed());
    }
    let weight: f64 = input.parse().map_err(|_| malformed())?;
    if weight <= 0.0 || weight > USSD_MAX_WEIGHT_KG {
        return Err(invalid_input(format!(
            "weight must be greater than 0 and at most {USSD_MAX_WEIGHT_KG} kg"
        )));
    }
    Ok(weight)
}

fn parse_reference(input: &str) -> Result<String, Error> {
    if !REFERENCE_LEN.contains(&input.len()) || !input.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid_input(
            "tracking reference must be 6 to 12 letters or digits",
        ));
    }
    Ok(input.to_ascii_uppercase())
}

impl UssdMenuState {
    /// Apply one input to this state.
    pub fn accept(self, input: &str) -> Result<UssdOutcome, Error> {
        use UssdOutcome::{Command, Prompt};

        match self {
            Self::Main => match input {
                "1" => Ok(Prompt(Self::PostOrigin)),
                "2" => Ok(Prompt(Self::TrackReference)),
                "3" => Ok(Prompt(Self::Account)),
                "0" => Ok(Command(UssdCommand::Exit)),
                _ => Err(invalid_input("choose 1, 2, 3, or 0")),
            },
            Self::PostOrigin => Ok(Prompt(Self::PostDestination {
                origin: district_choice(input)?,
            })),
            Self::PostDestination { origin } => {
                let destination = district_choice(input)?;
                if destination == origin {
                    return Err(invalid_input("destination must differ from origin"));
                }
                Ok(Prompt(Self::PostWeight {
                    origin,
                    destination,
                }))
            }
            Self::PostWeight {
                origin,
                destination,
            } => Ok(Prompt(Self::PostConfirm {
                origin,
                destination,
                weight_kg: parse_weight(input)?,
            })),
            Self::PostConfirm {
                origin,
                destination,
                weight_kg,
            } => match input {
                "1" => Ok(Command(UssdCommand::PostShipment {
                    origin,
                    destination,
                    weight_kg,
                })),
                "2" => Ok(Command(UssdCommand::Cancelled)),
                _ => Err(invalid_input("choose 1 to confirm or 2 to cancel")),
            },
            Self::TrackReference => Ok(Command(UssdCommand::TrackShipment {
                reference: parse_reference(input)?,
            })),
            Self::Account => match input {
                "1" => Ok(Command(UssdCommand::ViewAccount)),
                "0" => Ok(Prompt(Self::Main)),
                _ => Err(invalid_input("choose 1 or 0")),
            },
        }
    }

    /// Menu text shown for this state, using the gateway `CON` convention.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::Main => {
                "CON Welcome to Matola\n1. Post shipment\n2. Track shipment\n3. My account\n0. Exit"
                    .to_owned()
            }
            Self::PostOrigin => district_menu("Pick-up town"),
            Self::PostDestination { .. } => district_menu("Drop-off town"),
            Self::PostWeight { .. } => "CON Enter weight in kg".to_owned(),
            Self::PostConfirm {
                origin,
                destination,
                weight_kg,
            } => format!(
                "CON {} to {}, {weight_kg} kg\n1. Confirm\n2. Cancel",
                origin.name(),
                destination.name()
            ),
            Self::TrackReference => "CON Enter tracking reference".to_owned(),
            Self::Account => "CON My account\n1. View profile\n0. Back".to_owned(),
        }
    }
}

fn district_menu(title: &str) -> String {
    let mut menu = format!("CON {title}");
    for (index, district) in District::ALL.iter().enumerate() {
        menu.push_str(&format!("\n{}. {}", index + 1, district.name()));
    }
    menu
}

/// Replay a session's `*`-joined input history.
///
/// Empty text is a fresh session and yields the main menu. Inputs after a
/// final command are rejected.
///
/// # Examples
/// ```
/// use matola::domain::geo::District;
/// use matola::domain::ussd::{UssdCommand, UssdOutcome, interpret};
///
/// let outcome = interpret("1*1*2*1500*1").unwrap();
/// assert_eq!(
///     outcome,
///     UssdOutcome::Command(UssdCommand::PostShipment {
///         origin: District::Lilongwe,
///         destination: District::Blantyre,
///         weight_kg: 1500.0,
///     })
/// );
/// ```
pub fn interpret(text: &str) -> Result<UssdOutcome, Error> {
    if text.len() > USSD_MAX_TEXT_LEN {
        return Err(invalid_input("session input is too long"));
    }
    let mut outcome = UssdOutcome::Prompt(UssdMenuState::Main);
    if text.trim().is_empty() {
        return Ok(outcome);
    }
    for input in text.split('*') {
        let UssdOutcome::Prompt(state) = outcome else {
            return Err(invalid_input("session has already ended"));
        };
        outcome = state.accept(input.trim())?;
    }
    Ok(outcome)
}

/// Inbound gateway callback after field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdRequest {
    session_id: String,
    phone: PhoneNumber,
    text: String,
}

impl UssdRequest {
    /// Validate the raw callback fields.
    pub fn try_from_parts(session_id: &str, phone: &str, text: &str) -> Result<Self, Error> {
        let session_id = session_id.trim();
        if session_id.is_empty() || session_id.chars().count() > SESSION_ID_MAX_LEN {
            return Err(invalid_input("session id must be 1 to 64 characters"));
        }
        Ok(Self {
            session_id: session_id.to_owned(),
            phone: PhoneNumber::parse(phone)?,
            text: text.to_owned(),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        self.session_id.as_str()
    }

    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Replay this request's session history.
    pub fn interpret(&self) -> Result<UssdOutcome, Error> {
        interpret(&self.text)
    }
}
