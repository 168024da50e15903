mod hud;
