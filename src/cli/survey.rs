//! Survey-level commands
//!
//! - Retrieving the metadata document of a survey
//! - Listing the variables of a survey

use structopt::StructOpt;

use crate::catalog_api::survey;
use crate::client::BaseClient;

use super::base::{block_on, evaluate_and_print_response, Matcher};

/// Subcommands for surveys in the catalog
#[derive(StructOpt, Debug)]
#[structopt(about = "Retrieve survey metadata and variables")]
pub enum SurveySubCommand {
    /// Retrieve a survey's metadata
    #[structopt(about = "Retrieve the metadata of a survey")]
    Meta {
        #[structopt(help = "Identifier (idno) of the survey")]
        idno: String,
    },

    /// List the variables of a survey
    #[structopt(about = "List the variables of a survey")]
    Variables {
        #[structopt(help = "Identifier (idno) of the survey")]
        idno: String,

        #[structopt(long, help = "Only print the variable identifiers (vid)")]
        ids: bool,
    },
}

impl Matcher for SurveySubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            SurveySubCommand::Meta { idno } => {
                let response = block_on(survey::metadata::get_survey_meta(client, &idno));
                evaluate_and_print_response(response);
            }
            SurveySubCommand::Variables { idno, ids } => {
                let response = block_on(survey::variables::get_survey_variables(client, &idno));

                if ids {
                    evaluate_and_print_response(response.map(|variables| variables.vids));
                } else {
                    evaluate_and_print_response(response);
                }
            }
        }
    }
}
