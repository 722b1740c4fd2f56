mod favorite;
mod ingredient;
mod ingredient_recipe;
mod recipe;
mod recipe_tag;
mod shopping_cart;
mod subscription;
mod tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        user::CreateUk2,
        subscription::CreateTable,
        subscription::CreateIdx1,
        ingredient::CreateTable,
        ingredient::CreateUk1,
        tag::CreateTable,
        tag::CreateUk1,
        recipe::CreateTable,
        recipe::CreateUk1,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_tag::CreateTable,
        recipe_tag::CreateIdx1,
        ingredient_recipe::CreateTable,
        ingredient_recipe::CreateUk1,
        favorite::CreateTable,
        favorite::CreateIdx1,
        shopping_cart::CreateTable,
        shopping_cart::CreateIdx1
    ]
);
