mod all;
mod footer;
mod issue_detail;
mod issue_list;
mod log;
mod modal;
mod sidebar;

use self::log::log;
use super::*;
use footer::footer;
use issue_detail::issue_detail;
use issue_list::issue_list;
use modal::delete_confirmation;
use sidebar::sidebar;

pub use all::all as render;
