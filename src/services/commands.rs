//! Validated request forms. Constructors trim input and reject malformed
//! fields, so nothing unchecked reaches an operation.

use mongodb::bson::oid::ObjectId;

use crate::utils::error::{AppError, AppResult};

pub fn parse_poll_id(poll_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(poll_id).map_err(|_| AppError::ValidationError("Invalid poll id".to_string()))
}

#[derive(Debug)]
pub struct CreatePollCommand {
    pub options: Vec<String>,
    pub is_multi_select: bool,
}

impl CreatePollCommand {
    pub fn new(options: Vec<String>, is_multi_select: bool) -> AppResult<Self> {
        let options: Vec<String> = options.into_iter().map(|text| text.trim().to_string()).collect();

        if options.iter().any(|text| text.is_empty()) {
            return Err(AppError::ValidationError("Poll options must not be blank".to_string()));
        }
        if options.len() < 2 {
            return Err(AppError::ValidationError(
                "Enter atleast 2 options for the user to select from".to_string(),
            ));
        }
        for (index, text) in options.iter().enumerate() {
            if options[..index].contains(text) {
                return Err(AppError::ValidationError("Poll options must be unique".to_string()));
            }
        }

        Ok(Self { options, is_multi_select })
    }
}

#[derive(Debug)]
pub struct VoteCommand {
    pub poll_id: ObjectId,
    pub option_id: String,
}

impl VoteCommand {
    pub fn new(poll_id: &str, option_id: &str) -> AppResult<Self> {
        let option_id = option_id.trim();
        if option_id.is_empty() {
            return Err(AppError::ValidationError("Missing option id".to_string()));
        }
        Ok(Self {
            poll_id: parse_poll_id(poll_id)?,
            option_id: option_id.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct AddOptionCommand {
    pub poll_id: ObjectId,
    pub text: String,
}

impl AddOptionCommand {
    pub fn new(poll_id: &str, text: &str) -> AppResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError("Option text must not be blank".to_string()));
        }
        Ok(Self {
            poll_id: parse_poll_id(poll_id)?,
            text: text.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct RemoveOptionCommand {
    pub poll_id: ObjectId,
    pub option_id: String,
}

impl RemoveOptionCommand {
    pub fn new(poll_id: &str, option_id: &str) -> AppResult<Self> {
        let option_id = option_id.trim();
        if option_id.is_empty() {
            return Err(AppError::ValidationError("Missing option id".to_string()));
        }
        Ok(Self {
            poll_id: parse_poll_id(poll_id)?,
            option_id: option_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_fewer_than_two_options() {
        let err = CreatePollCommand::new(vec!["only".to_string()], false).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn create_rejects_blank_and_duplicate_options() {
        let blank = CreatePollCommand::new(vec!["a".to_string(), "  ".to_string()], false);
        assert!(matches!(blank, Err(AppError::ValidationError(_))));

        let duplicate = CreatePollCommand::new(vec!["a".to_string(), " a ".to_string()], false);
        assert!(matches!(duplicate, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn create_trims_option_text() {
        let cmd = CreatePollCommand::new(vec![" red ".to_string(), "blue".to_string()], true).unwrap();
        assert_eq!(cmd.options, vec!["red".to_string(), "blue".to_string()]);
        assert!(cmd.is_multi_select);
    }

    #[test]
    fn vote_command_rejects_malformed_ids() {
        assert!(matches!(
            VoteCommand::new("not-an-id", "abc"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            VoteCommand::new(&ObjectId::new().to_hex(), "  "),
            Err(AppError::ValidationError(_))
        ));
    }
}
