pub mod balance_service;
pub mod mail_service;
pub mod report_service;
