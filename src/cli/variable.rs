use structopt::StructOpt;

use crate::catalog_api::variable;
use crate::client::BaseClient;

use super::base::{block_on, evaluate_and_print_response, Matcher};

/// Subcommands for single variables of a survey
#[derive(StructOpt, Debug)]
#[structopt(about = "Retrieve variable metadata")]
pub enum VariableSubCommand {
    /// Retrieve a variable's metadata
    #[structopt(about = "Retrieve the metadata of a variable")]
    Meta {
        #[structopt(help = "Identifier (idno) of the survey")]
        idno: String,

        #[structopt(help = "Identifier (vid) of the variable")]
        vid: String,
    },
}

impl Matcher for VariableSubCommand {
    fn process(self, client: &BaseClient) {
        let response = match self {
            VariableSubCommand::Meta { idno, vid } => {
                block_on(variable::metadata::get_variable_meta(client, &idno, &vid))
            }
        };

        evaluate_and_print_response(response);
    }
}
