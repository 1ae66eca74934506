use clap::Parser;

use crate::{config, Error};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Show;

impl Show {
    pub fn run(self) -> Result<(), Error> {
        let config = config::load()?;
        let wallet = config::wallet()?;

        println!("{config:#?}");
        println!("{wallet:#?}");
        Ok(())
    }
}
