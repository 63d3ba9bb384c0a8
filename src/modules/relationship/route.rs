use crate::modules::relationship::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(get_friends_list).service(get_invites_list).service(
        scope("/relationships")
            .service(add_relationship)
            .service(update_relationship)
            .service(get_relationship)
            .service(delete_relationship),
    );
}
