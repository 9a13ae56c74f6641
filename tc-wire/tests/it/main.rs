mod pedit;
mod records;
