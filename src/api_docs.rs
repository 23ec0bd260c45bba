use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::me,
        api::user::list_users,
        api::user::get_user,
        api::user::create_user,
        api::user::update_user,
        api::user::delete_user,
        api::genre::list_genres,
        api::genre::get_genre,
        api::genre::create_genre,
        api::genre::update_genre,
        api::genre::delete_genre,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::news::list_news,
        api::news::get_news,
        api::news::create_news,
        api::news::update_news,
        api::news::delete_news,
        api::status::list_statuses,
        api::status::create_status,
        api::order::list_orders,
        api::order::get_order,
        api::order::create_order,
        api::order::delete_order,
        api::assignments::list_assignments,
        api::assignments::get_assignment,
        api::assignments::create_assignment,
        api::assignments::update_assignment,
        api::assignments::delete_assignment,
        api::assignments::list_readers,
        api::assignments::record_reader,
        api::coups_de_coeur::list_coups_de_coeur,
        api::coups_de_coeur::get_coup_de_coeur,
        api::coups_de_coeur::create_coup_de_coeur,
        api::coups_de_coeur::replace_coup_de_coeur,
        api::coups_de_coeur::delete_coup_de_coeur,
        api::coups_de_coeur::list_books,
        api::coups_de_coeur::check_book,
        api::coups_de_coeur::add_book,
        api::coups_de_coeur::add_book_by_path,
        api::coups_de_coeur::remove_book,
        api::coups_de_coeur::remove_book_by_path,
    ),
    components(
        schemas(
            api::auth::LoginRequest,
            api::user::CreateUserRequest,
            api::user::UpdateUserRequest,
            api::genre::GenreRequest,
            api::books::CreateBookRequest,
            api::books::UpdateBookRequest,
            api::news::CreateNewsRequest,
            api::news::UpdateNewsRequest,
            api::status::CreateStatusRequest,
            api::order::CreateOrderRequest,
            api::assignments::CreateAssignmentRequest,
            api::assignments::UpdateAssignmentRequest,
            api::assignments::RecordReaderRequest,
            api::coups_de_coeur::CoupDeCoeurRequest,
            api::coups_de_coeur::BookLinkRequest,
        )
    ),
    tags(
        (name = "eca-admin", description = "ECA audiobook lending back office")
    )
)]
pub struct ApiDoc;
