/// Already-normalized input for inserting a user.
///
/// The password is hashed before this DTO is built; stores never see the
/// plaintext.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
