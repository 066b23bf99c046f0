mod recovery;
mod scenarios;
