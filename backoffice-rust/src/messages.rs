//! Texts shown by the backoffice pages.

pub const REGISTERING: &str = "Registrando...";
pub const ACCOUNT_CREATED: &str = "Cuenta creada";
pub const LOGGING_IN: &str = "Iniciando sesion...";
pub const SAVING: &str = "Guardando...";
pub const CREATED: &str = "Creado";
pub const UPDATED: &str = "Actualizado";
pub const DELETED: &str = "Eliminado";

pub const NEW_PROJECT_TITLE: &str = "Nuevo proyecto";
pub const EDIT_PROJECT_TITLE: &str = "Editar proyecto";

pub const NO_PROJECTS: &str = "Sin proyectos";
pub const EDIT_ACTION: &str = "Editar";
pub const DELETE_ACTION: &str = "Eliminar";
