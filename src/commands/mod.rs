pub mod convert_cmds;
pub mod editor_cmds;
pub mod open_folder;
pub mod recent;
pub mod scan_cmds;
