use std::sync::Arc;

use crate::application::authors::AuthorService;
use crate::application::books::BookService;
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct ApiState {
    pub authors: Arc<AuthorService>,
    pub books: Arc<BookService>,
    pub health: Arc<dyn HealthRepo>,
}
